//! Route table and navigation boundary.
//!
//! The table maps each tool path to an opaque [`ToolPage`] handle plus
//! display metadata. It is fixed at startup: one redirect sends `/` to the
//! default tool, and any unmapped path falls back to that same redirect.
//!
//! [`Navigator`] owns the table and the current route. After every
//! successful navigation it runs its [`NavigationObserver`]s in registration
//! order; [`TitleObserver`] is the one that keeps the window title in sync.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::names::*;

/// Suffix appended to every page title, and the title used when a route has
/// none of its own.
pub const TITLE_SUFFIX: &str = "開發者工具箱";

/// Opaque handle for the page a route renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolPage {
    JsonTool,
    MarkdownTool,
    ToonConverter,
    PasswordGenerator,
    DiffViewer,
    DocumentViewer,
}

/// Per-route display metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<String>,
}

/// A navigable path and the page behind it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub page: ToolPage,
    pub meta: RouteMeta,
}

impl RouteEntry {
    /// Entry whose name and tool id are both `tool_id`.
    pub fn tool(path: &str, tool_id: &str, page: ToolPage, title: &str) -> Self {
        Self {
            path: path.to_string(),
            name: tool_id.to_string(),
            page,
            meta: RouteMeta {
                title: Some(title.to_string()),
                tool_id: Some(tool_id.to_string()),
            },
        }
    }
}

/// A path that forwards to another path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

/// Static path → page table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    root_redirect: Redirect,
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(root_redirect: Redirect, entries: Vec<RouteEntry>) -> Self {
        Self {
            root_redirect,
            entries,
        }
    }

    /// The toolbox's route table.
    pub fn builtin() -> Self {
        Self::new(
            Redirect {
                from: ROOT_PATH.to_string(),
                to: JSON_TOOL_PATH.to_string(),
            },
            vec![
                RouteEntry::tool(JSON_TOOL_PATH, JSON_TOOL, ToolPage::JsonTool, "JSON 工具"),
                RouteEntry::tool(
                    MARKDOWN_TOOL_PATH,
                    MARKDOWN_TOOL,
                    ToolPage::MarkdownTool,
                    "Markdown 編輯",
                ),
                RouteEntry::tool(
                    TOON_CONVERTER_PATH,
                    TOON_CONVERTER,
                    ToolPage::ToonConverter,
                    "TOON 轉換",
                ),
                RouteEntry::tool(
                    PASSWORD_GENERATOR_PATH,
                    PASSWORD_GENERATOR,
                    ToolPage::PasswordGenerator,
                    "密碼產生器",
                ),
                RouteEntry::tool(DIFF_VIEWER_PATH, DIFF_VIEWER, ToolPage::DiffViewer, "Diff 檢視"),
                RouteEntry::tool(
                    DOCUMENT_VIEWER_PATH,
                    DOCUMENT_VIEWER,
                    ToolPage::DocumentViewer,
                    "文檔檢視",
                ),
            ],
        )
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn root_redirect(&self) -> &Redirect {
        &self.root_redirect
    }

    /// Exact lookup of a page route (redirects are not followed).
    pub fn get(&self, path: &str) -> Option<&RouteEntry> {
        let path = normalize_path(path);
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Resolve `path` to the page that will be shown.
    ///
    /// The root redirect is followed, and unmapped paths take the root
    /// redirect too. `None` only when the redirect target itself is missing.
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        if let Some(entry) = self.get(path) {
            return Some(Resolved {
                entry,
                redirected: false,
            });
        }
        if normalize_path(path) != self.root_redirect.from {
            debug!(path, "Unmapped path; falling back to root redirect");
        }
        self.get(&self.root_redirect.to).map(|entry| Resolved {
            entry,
            redirected: true,
        })
    }

    /// Check that paths and names are unique and the redirect target exists.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let earlier = &self.entries[..i];
            if earlier.iter().any(|e| e.path == entry.path) {
                problems.push(format!("duplicate route path '{}'", entry.path));
            }
            if earlier.iter().any(|e| e.name == entry.name) {
                problems.push(format!("duplicate route name '{}'", entry.name));
            }
        }
        if self.get(&self.root_redirect.to).is_none() {
            problems.push(format!(
                "root redirect target '{}' is not a route",
                self.root_redirect.to
            ));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Result of [`RouteTable::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub entry: &'a RouteEntry,
    /// True when the requested path was not itself a page route.
    pub redirected: bool,
}

/// Strip a trailing slash from every path except the root.
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}

/// Title shown for `meta`: `"{title} - {suffix}"`, or just `suffix`.
pub fn page_title(meta: &RouteMeta, suffix: &str) -> String {
    match &meta.title {
        Some(title) => format!("{title} - {suffix}"),
        None => suffix.to_string(),
    }
}

// ── Observers ──────────────────────────────────────────────────────

/// Hook run after every successful navigation.
pub trait NavigationObserver: Send + Sync {
    fn after_navigate(&self, to: &RouteEntry);
}

/// Shared, overwritable window/document title.
#[derive(Clone, Debug)]
pub struct DocumentTitle(Arc<Mutex<String>>);

impl DocumentTitle {
    pub fn new(initial: impl Into<String>) -> Self {
        Self(Arc::new(Mutex::new(initial.into())))
    }

    pub fn get(&self) -> String {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, title: impl Into<String>) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = title.into();
    }
}

impl Default for DocumentTitle {
    fn default() -> Self {
        Self::new(TITLE_SUFFIX)
    }
}

/// Writes [`page_title`] into a [`DocumentTitle`] on every navigation.
pub struct TitleObserver {
    title: DocumentTitle,
    suffix: String,
}

impl TitleObserver {
    pub fn new(title: DocumentTitle, suffix: impl Into<String>) -> Self {
        Self {
            title,
            suffix: suffix.into(),
        }
    }
}

impl NavigationObserver for TitleObserver {
    fn after_navigate(&self, to: &RouteEntry) {
        self.title.set(page_title(&to.meta, &self.suffix));
    }
}

/// Adapter so closures can be registered as observers.
pub struct FnObserver<F>(pub F);

impl<F: Fn(&RouteEntry) + Send + Sync> NavigationObserver for FnObserver<F> {
    fn after_navigate(&self, to: &RouteEntry) {
        (self.0)(to)
    }
}

// ── Navigator ──────────────────────────────────────────────────────

/// Outcome of a successful [`Navigator::navigate`] call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Path as requested by the caller.
    pub requested: String,
    /// Route actually shown.
    pub entry: RouteEntry,
    pub redirected: bool,
}

/// Owns the route table and the current route; runs observers.
pub struct Navigator {
    table: RouteTable,
    current: Option<RouteEntry>,
    observers: Vec<Box<dyn NavigationObserver>>,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            current: None,
            observers: Vec::new(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> Option<&RouteEntry> {
        self.current.as_ref()
    }

    pub fn add_observer(&mut self, observer: impl NavigationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Builder form of [`add_observer`](Self::add_observer).
    pub fn with_observer(mut self, observer: impl NavigationObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Navigate to `path`, following redirects, then run observers.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, String> {
        let resolved = self
            .table
            .resolve(path)
            .ok_or_else(|| format!("No route for '{path}' and no usable root redirect"))?;
        let entry = resolved.entry.clone();
        let redirected = resolved.redirected;

        debug!(requested = path, to = %entry.path, redirected, "Navigated");
        self.current = Some(entry.clone());
        for observer in &self.observers {
            observer.after_navigate(&entry);
        }

        Ok(Navigation {
            requested: path.to_string(),
            entry,
            redirected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled_navigator() -> (Navigator, DocumentTitle) {
        let title = DocumentTitle::default();
        let nav = Navigator::new(RouteTable::builtin())
            .with_observer(TitleObserver::new(title.clone(), TITLE_SUFFIX));
        (nav, title)
    }

    #[test]
    fn builtin_table_is_valid() {
        let table = RouteTable::builtin();
        assert_eq!(table.validate(), Ok(()));
        assert_eq!(table.entries().len(), 6);
        assert_eq!(table.root_redirect().from, "/");
        assert_eq!(table.root_redirect().to, "/tool/json-tool");
    }

    #[test]
    fn every_entry_carries_title_and_tool_id() {
        for entry in RouteTable::builtin().entries() {
            assert!(entry.meta.title.is_some(), "{} lacks a title", entry.path);
            assert_eq!(entry.meta.tool_id.as_deref(), Some(entry.name.as_str()));
            assert_eq!(entry.path, format!("/tool/{}", entry.name));
        }
    }

    #[test]
    fn root_resolves_through_redirect() {
        let table = RouteTable::builtin();
        let resolved = table.resolve("/").unwrap();
        assert!(resolved.redirected);
        assert_eq!(resolved.entry.page, ToolPage::JsonTool);
    }

    #[test]
    fn unmapped_path_falls_back_to_root_redirect() {
        let table = RouteTable::builtin();
        let resolved = table.resolve("/tool/nope").unwrap();
        assert!(resolved.redirected);
        assert_eq!(resolved.entry.path, JSON_TOOL_PATH);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let table = RouteTable::builtin();
        let resolved = table.resolve("/tool/diff-viewer/").unwrap();
        assert!(!resolved.redirected);
        assert_eq!(resolved.entry.page, ToolPage::DiffViewer);
    }

    #[test]
    fn lookup_by_name() {
        let table = RouteTable::builtin();
        assert_eq!(
            table.get_by_name(PASSWORD_GENERATOR).unwrap().path,
            PASSWORD_GENERATOR_PATH
        );
        assert!(table.get_by_name("missing").is_none());
    }

    #[test]
    fn page_title_with_and_without_meta_title() {
        let meta = RouteMeta {
            title: Some("X".into()),
            tool_id: None,
        };
        assert_eq!(page_title(&meta, "Suffix"), "X - Suffix");
        assert_eq!(page_title(&RouteMeta::default(), "Suffix"), "Suffix");
    }

    #[test]
    fn navigating_to_markdown_sets_title() {
        let (mut nav, title) = titled_navigator();
        let navigation = nav.navigate("/tool/markdown-tool").unwrap();
        assert!(!navigation.redirected);
        assert_eq!(title.get(), "Markdown 編輯 - 開發者工具箱");
        assert_eq!(nav.current().unwrap().path, MARKDOWN_TOOL_PATH);
    }

    #[test]
    fn navigating_to_unmapped_path_shows_default_tool() {
        let (mut nav, title) = titled_navigator();
        let navigation = nav.navigate("/nowhere").unwrap();
        assert!(navigation.redirected);
        assert_eq!(navigation.requested, "/nowhere");
        assert_eq!(navigation.entry.path, JSON_TOOL_PATH);
        assert_eq!(title.get(), "JSON 工具 - 開發者工具箱");
    }

    #[test]
    fn untitled_route_uses_default_title() {
        let table = RouteTable::new(
            Redirect {
                from: "/".into(),
                to: "/bare".into(),
            },
            vec![RouteEntry {
                path: "/bare".into(),
                name: "bare".into(),
                page: ToolPage::JsonTool,
                meta: RouteMeta::default(),
            }],
        );
        let title = DocumentTitle::new("before");
        let mut nav =
            Navigator::new(table).with_observer(TitleObserver::new(title.clone(), TITLE_SUFFIX));
        nav.navigate("/bare").unwrap();
        assert_eq!(title.get(), TITLE_SUFFIX);
    }

    #[test]
    fn broken_redirect_is_an_error() {
        let table = RouteTable::new(
            Redirect {
                from: "/".into(),
                to: "/missing".into(),
            },
            Vec::new(),
        );
        assert!(table.validate().is_err());
        let mut nav = Navigator::new(table);
        assert!(nav.navigate("/").is_err());
        assert!(nav.current().is_none());
    }

    #[test]
    fn observers_run_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = log.clone();
        let second = log.clone();
        let mut nav = Navigator::new(RouteTable::builtin());
        nav.add_observer(FnObserver(move |e: &RouteEntry| {
            first.lock().unwrap().push(format!("a:{}", e.name))
        }));
        nav.add_observer(FnObserver(move |e: &RouteEntry| {
            second.lock().unwrap().push(format!("b:{}", e.name))
        }));
        nav.navigate(DIFF_VIEWER_PATH).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:diff-viewer".to_string(), "b:diff-viewer".to_string()]
        );
    }

    #[test]
    fn current_route_is_set_before_observers_run() {
        fn failing(_: &RouteEntry) {
            panic!("observer failed");
        }

        let mut navigator =
            Navigator::new(RouteTable::builtin()).with_observer(FnObserver(failing));
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            navigator.navigate(DIFF_VIEWER_PATH)
        }));
        assert!(outcome.is_err());
        assert_eq!(navigator.current().unwrap().path, DIFF_VIEWER_PATH);
    }
}
