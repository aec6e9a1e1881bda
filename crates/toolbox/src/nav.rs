//! Sidebar navigation and menu-mode state.
//!
//! One [`NavState`] exists per running application (see
//! [`AppContext`](crate::context::AppContext)). It tracks three flags:
//!
//! - `collapsed`: persisted under [`COLLAPSED_KEY`], default `false`
//! - `mode`: [`MenuMode::List`] or [`MenuMode::Search`], starts in list mode
//! - `search_focused`: whether the search box owns keyboard focus
//!
//! Every operation is a single `&mut self` call, so when the state sits
//! behind a mutex each one is a single critical section. Observers are
//! notified once per operation, after all of its effects are applied, and
//! only when the visible state actually changed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prefs::{KvStore, Preference};

/// Storage key for the sidebar collapsed flag.
pub const COLLAPSED_KEY: &str = "terminal-sidebar-collapsed";

/// What the sidebar menu is currently showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuMode {
    /// Categorised tool list.
    #[default]
    List,
    /// Search box and filtered results.
    Search,
}

/// Copy of the navigation flags at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSnapshot {
    pub collapsed: bool,
    pub mode: MenuMode,
    pub search_focused: bool,
}

type NavObserver = Box<dyn Fn(&NavSnapshot) + Send + Sync>;

/// Navigation/mode state shared by every UI surface.
pub struct NavState {
    collapsed: Preference<bool>,
    mode: MenuMode,
    search_focused: bool,
    observers: Vec<NavObserver>,
}

impl NavState {
    /// Load the collapsed flag from `store`; mode and focus start fresh.
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        Self {
            collapsed: Preference::load(store, COLLAPSED_KEY, false),
            mode: MenuMode::List,
            search_focused: false,
            observers: Vec::new(),
        }
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed.value()
    }

    pub fn mode(&self) -> MenuMode {
        self.mode
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            collapsed: self.collapsed(),
            mode: self.mode,
            search_focused: self.search_focused,
        }
    }

    /// Flip the collapsed flag and persist it.
    pub fn toggle_collapsed(&mut self) {
        let before = self.snapshot();
        self.collapsed.update(|c| *c = !*c);
        debug!(collapsed = self.collapsed(), "Sidebar toggled");
        self.notify_if_changed(before);
    }

    /// Set the menu mode. Touches nothing else.
    pub fn set_mode(&mut self, mode: MenuMode) {
        let before = self.snapshot();
        self.mode = mode;
        self.notify_if_changed(before);
    }

    /// Set the search focus flag. Touches nothing else.
    pub fn set_search_focused(&mut self, focused: bool) {
        let before = self.snapshot();
        self.search_focused = focused;
        self.notify_if_changed(before);
    }

    /// Enter search mode: expand the sidebar if it is collapsed, switch to
    /// [`MenuMode::Search`], and focus the search box.
    ///
    /// Observers see only the final state.
    pub fn focus_search(&mut self) {
        let before = self.snapshot();
        if self.collapsed() {
            self.collapsed.set(false);
        }
        self.mode = MenuMode::Search;
        self.search_focused = true;
        debug!("Search focused");
        self.notify_if_changed(before);
    }

    /// Register a callback run with the new snapshot after each change.
    ///
    /// Callbacks run while the owner holds the state, so they must not try
    /// to lock the same `NavState` again.
    pub fn subscribe(&mut self, f: impl Fn(&NavSnapshot) + Send + Sync + 'static) {
        self.observers.push(Box::new(f));
    }

    fn notify_if_changed(&self, before: NavSnapshot) {
        let after = self.snapshot();
        if after == before {
            return;
        }
        for observer in &self.observers {
            observer(&after);
        }
    }
}
