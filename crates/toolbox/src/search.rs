//! Menu search: a case-insensitive substring filter over catalog items.
//!
//! Matching checks the label, every alias, and the description. There is no
//! scoring: results keep catalog order, and an empty (or whitespace-only)
//! query returns the input unchanged.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, MenuItem};

/// Trim and lower-case a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `item` matches an already-normalised, non-empty query.
pub fn item_matches(item: &MenuItem, needle: &str) -> bool {
    item.label.to_lowercase().contains(needle)
        || item
            .aliases
            .iter()
            .any(|alias| alias.to_lowercase().contains(needle))
        || item.description.to_lowercase().contains(needle)
}

/// Filter `items` by `query`, preserving input order.
///
/// Accepts anything that yields `&MenuItem`, so a previous result can be
/// searched again with `search(q, prev.iter().copied())`.
pub fn search<'a, I>(query: &str, items: I) -> Vec<&'a MenuItem>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    let needle = normalize_query(query);
    if needle.is_empty() {
        return items.into_iter().collect();
    }
    items
        .into_iter()
        .filter(|item| item_matches(item, &needle))
        .collect()
}

/// Query held by a search box.
///
/// Results are never cached: every call to [`results`](Self::results)
/// re-derives them, so setting a new query simply supersedes the old one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    query: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// True when the query filters anything.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn results<'a>(&self, catalog: &'a Catalog) -> Vec<&'a MenuItem> {
        search(&self.query, catalog.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuCategory;
    use crate::names::*;

    fn ids<'a>(items: &[&'a MenuItem]) -> Vec<&'a str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let catalog = Catalog::builtin();
        let all: Vec<&MenuItem> = catalog.items().iter().collect();
        assert_eq!(search("", catalog.items()), all);
        assert_eq!(search("   \t\n", catalog.items()), all);
    }

    #[test]
    fn format_hits_json_tool() {
        let hits = search("format", Catalog::builtin().items());
        assert!(ids(&hits).contains(&JSON_TOOL));
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search("zzz-nomatch", Catalog::builtin().items()).is_empty());
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        let hits = search("  MarkDown ", Catalog::builtin().items());
        assert_eq!(ids(&hits), vec![MARKDOWN_TOOL]);
    }

    #[test]
    fn matches_label_alias_and_description() {
        let catalog = Catalog::builtin();
        // Label only.
        assert_eq!(ids(&search("密碼產生器", catalog.items())), vec![PASSWORD_GENERATOR]);
        // Alias only.
        assert_eq!(ids(&search("pwd", catalog.items())), vec![PASSWORD_GENERATOR]);
        // Description only.
        assert_eq!(ids(&search("差異", catalog.items())), vec![DIFF_VIEWER]);
    }

    #[test]
    fn every_hit_matches_some_field() {
        let catalog = Catalog::builtin();
        for q in ["json", "預覽", "e", "VIEW", "轉換", "t"] {
            let needle = q.to_lowercase();
            for item in search(q, catalog.items()) {
                let hit = item.label.to_lowercase().contains(&needle)
                    || item.aliases.iter().any(|a| a.to_lowercase().contains(&needle))
                    || item.description.to_lowercase().contains(&needle);
                assert!(hit, "{} should not match {q}", item.id);
            }
        }
    }

    #[test]
    fn results_keep_catalog_order() {
        let catalog = Catalog::builtin();
        let hits = search("view", catalog.items());
        let positions: Vec<usize> = hits
            .iter()
            .map(|h| catalog.items().iter().position(|i| i.id == h.id).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(hits.len() >= 2);
    }

    #[test]
    fn search_is_idempotent() {
        let catalog = Catalog::builtin();
        for q in ["", "format", "e", "zzz"] {
            let once = search(q, catalog.items());
            let twice = search(q, once.iter().copied());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn works_on_custom_catalog() {
        let catalog = Catalog::new(
            vec![MenuCategory::new("c", "C", None)],
            vec![
                MenuItem::new("a", "Alpha", "c", "i", "/a", &["first"], "one"),
                MenuItem::new("b", "Beta", "c", "i", "/b", &["second"], "two"),
            ],
        );
        assert_eq!(ids(&search("SECOND", catalog.items())), vec!["b"]);
        assert_eq!(ids(&search("o", catalog.items())), vec!["a", "b"]);
    }

    #[test]
    fn search_state_set_and_clear() {
        let catalog = Catalog::builtin();
        let mut state = SearchState::new();
        assert!(!state.is_active());
        assert_eq!(state.results(catalog).len(), catalog.items().len());

        state.set_query("diff");
        assert!(state.is_active());
        assert_eq!(ids(&state.results(catalog)), vec![DIFF_VIEWER]);

        state.set_query("doc");
        assert_eq!(ids(&state.results(catalog)), vec![DOCUMENT_VIEWER]);

        state.clear();
        assert_eq!(state.query(), "");
        assert_eq!(state.results(catalog).len(), catalog.items().len());
    }

    #[test]
    fn search_state_edits_by_char() {
        let mut state = SearchState::new();
        state.push_char('m');
        state.push_char('d');
        assert_eq!(state.query(), "md");
        state.pop_char();
        assert_eq!(state.query(), "m");
    }
}
