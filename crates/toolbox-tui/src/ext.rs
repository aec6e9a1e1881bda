//! Extension trait for tool page rendering.
//!
//! The shell only knows an opaque [`ToolPage`] per route. Crates that
//! implement real tools plug their page bodies in through
//! [`ToolPageRenderer`] without forking the generic TUI.

use ratatui::text::Line;
use toolbox::catalog::MenuItem;
use toolbox::routes::ToolPage;

/// Trait for drawing the body of a tool page.
///
/// The default implementation returns `None`, which makes the shell show
/// its placeholder (label, description and aliases of the menu item).
pub trait ToolPageRenderer: Send + Sync {
    /// Lines to show in the page pane for `page`.
    ///
    /// `item` is the menu item whose route leads to the page, when there is
    /// one.
    fn page_lines(&self, page: ToolPage, item: Option<&MenuItem>) -> Option<Vec<Line<'static>>> {
        let _ = (page, item);
        None
    }
}

/// Renderer that always falls back to the placeholder page.
pub struct PlaceholderPages;

impl ToolPageRenderer for PlaceholderPages {}
