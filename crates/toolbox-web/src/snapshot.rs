//! Serializable projection of an [`AppContext`] for WebSocket and REST
//! transport.
//!
//! The context itself is a set of mutex-guarded handles; [`ShellSnapshot`]
//! copies out everything a browser needs to draw the shell in one go.

use serde::Serialize;
use toolbox::context::AppContext;
use toolbox::nav::NavSnapshot;
use toolbox::routes::RouteEntry;
use toolbox::theme::Theme;

/// Serializable view of the shell state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShellSnapshot {
    // ── Sidebar ──
    pub nav: NavSnapshot,

    // ── Theme ──
    pub theme: Theme,
    pub theme_icon: &'static str,

    // ── Page ──
    pub title: String,
    /// Route currently shown, or `null` before the first navigation.
    pub current: Option<RouteEntry>,
}

impl ShellSnapshot {
    /// Build a snapshot from the current context.
    ///
    /// Takes each lock in turn and releases it before taking the next, so
    /// this must not be called from inside a state observer.
    pub fn from_context(ctx: &AppContext) -> Self {
        let nav = ctx.nav().snapshot();
        let theme = ctx.theme().current();
        let current = ctx.navigator().current().cloned();

        Self {
            nav,
            theme,
            theme_icon: theme.icon(),
            title: ctx.title(),
            current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use toolbox::nav::MenuMode;
    use toolbox::prefs::MemoryStore;

    fn ctx() -> AppContext {
        AppContext::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn snapshot_from_fresh_context() {
        let ctx = ctx();
        let snap = ShellSnapshot::from_context(&ctx);

        assert!(!snap.nav.collapsed);
        assert_eq!(snap.nav.mode, MenuMode::List);
        assert_eq!(snap.theme, Theme::Light);
        assert_eq!(snap.theme_icon, "bi-sun-fill");
        assert_eq!(snap.title, "開發者工具箱");
        assert!(snap.current.is_none());
    }

    #[test]
    fn snapshot_follows_navigation() {
        let ctx = ctx();
        ctx.navigate("/").unwrap();
        let snap = ShellSnapshot::from_context(&ctx);

        let current = snap.current.unwrap();
        assert_eq!(current.path, "/tool/json-tool");
        assert_eq!(snap.title, "JSON 工具 - 開發者工具箱");
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let ctx = ctx();
        ctx.cycle_theme();
        let json = serde_json::to_value(ShellSnapshot::from_context(&ctx)).unwrap();

        assert_eq!(json["theme"], "dark");
        assert_eq!(json["theme_icon"], "bi-moon-fill");
        assert_eq!(json["nav"]["mode"], "list");
        assert!(json["current"].is_null());
    }
}
