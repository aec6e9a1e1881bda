//! TUI-local state (not shared with other surfaces).

use toolbox::catalog::MenuItem;
use toolbox::context::AppContext;
use toolbox::logging::LogLine;
use toolbox::nav::MenuMode;
use toolbox::search::SearchState;

/// TUI-local state. Everything other surfaces must see lives in
/// [`AppContext`] instead.
pub(crate) struct App {
    /// Query typed into the sidebar search box.
    pub(crate) search: SearchState,
    /// Highlighted row in the visible menu list.
    pub(crate) selected: usize,
    /// Whether the logs pane is visible (toggled with `,`).
    pub(crate) show_logs: bool,
    /// Offset from the bottom of the log (0 = follow tail).
    pub(crate) log_scroll: usize,
    /// Captured tracing output, drained from the log buffer each frame.
    pub(crate) logs: Vec<LogLine>,
    /// Status message shown at the bottom until the next action.
    pub(crate) status_message: Option<String>,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            search: SearchState::new(),
            selected: 0,
            show_logs: false,
            log_scroll: 0,
            logs: Vec::new(),
            status_message: None,
            should_quit: false,
        }
    }

    /// Items the sidebar currently lists, in display order.
    ///
    /// Search mode shows the filtered results; list mode shows every item
    /// grouped by category.
    pub(crate) fn visible_items<'a>(&self, ctx: &'a AppContext, mode: MenuMode) -> Vec<&'a MenuItem> {
        match mode {
            MenuMode::Search => self.search.results(ctx.catalog()),
            MenuMode::List => ctx
                .catalog()
                .grouped()
                .into_iter()
                .flat_map(|group| group.items)
                .collect(),
        }
    }

    /// Keep the selection inside a list of `len` rows.
    pub(crate) fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
