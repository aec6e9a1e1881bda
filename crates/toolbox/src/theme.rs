//! Colour theme preference and its toggle cycle.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::prefs::{KvStore, Preference, StoredValue};

/// Storage key for the active theme.
pub const THEME_KEY: &str = "theme";

/// The three themes, in toggle order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Terminal,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Terminal];

    /// Next theme in the cycle `light → dark → terminal → light`.
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Terminal,
            Self::Terminal => Self::Light,
        }
    }

    /// Value written to the `data-theme` attribute and to storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Terminal => "terminal",
        }
    }

    /// Icon class shown on the toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "bi-sun-fill",
            Self::Dark => "bi-moon-fill",
            Self::Terminal => "bi-terminal",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "terminal" => Some(Self::Terminal),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoredValue for Theme {
    fn encode(&self) -> String {
        self.as_str().to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        Theme::parse(raw)
    }
}

/// The persisted theme selection.
pub struct ThemeState {
    pref: Preference<Theme>,
}

impl ThemeState {
    /// Load the theme from `store`; unknown or missing values load as
    /// [`Theme::Light`].
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        Self {
            pref: Preference::load(store, THEME_KEY, Theme::default()),
        }
    }

    pub fn current(&self) -> Theme {
        self.pref.value()
    }

    pub fn set(&mut self, theme: Theme) {
        self.pref.set(theme);
    }

    /// Advance to the next theme, persist it, and return it.
    pub fn cycle(&mut self) -> Theme {
        let next = self.current().next();
        self.pref.set(next);
        next
    }

    pub fn subscribe(&mut self, f: impl Fn(&Theme) + Send + Sync + 'static) {
        self.pref.subscribe(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    #[test]
    fn cycle_order_wraps() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Terminal);
        assert_eq!(Theme::Terminal.next(), Theme::Light);
    }

    #[test]
    fn icons_match_themes() {
        assert_eq!(Theme::Light.icon(), "bi-sun-fill");
        assert_eq!(Theme::Dark.icon(), "bi-moon-fill");
        assert_eq!(Theme::Terminal.icon(), "bi-terminal");
    }

    #[test]
    fn parse_round_trips_names() {
        for theme in Theme::ALL {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn defaults_to_light() {
        let state = ThemeState::load(Arc::new(MemoryStore::new()));
        assert_eq!(state.current(), Theme::Light);
    }

    #[test]
    fn unknown_stored_theme_loads_light() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(ThemeState::load(store).current(), Theme::Light);
    }

    #[test]
    fn cycle_persists_each_step() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let mut state = ThemeState::load(store.clone());

        assert_eq!(state.cycle(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(state.cycle(), Theme::Terminal);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("terminal"));
        assert_eq!(state.cycle(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));

        state.set(Theme::Terminal);
        assert_eq!(ThemeState::load(store).current(), Theme::Terminal);
    }
}
