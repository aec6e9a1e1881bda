//! Terminal UI shell for the developer toolbox.
//!
//! Renders the sidebar menu (list or search mode), the current tool page and
//! an optional log pane with ratatui + crossterm. All shared state lives in
//! an [`AppContext`]; this crate only keeps what is local to the terminal
//! (selection, typed query, scroll offsets). Tool page bodies are injected
//! via the [`ToolPageRenderer`] trait.
//!
//! # Quick start
//!
//! ```ignore
//! use toolbox::context::AppContext;
//! use toolbox_tui::{TuiConfig, run_tui};
//!
//! let ctx = AppContext::global();
//! run_tui(ctx, &TuiConfig::default())?;
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use ratatui::prelude::*;
use toolbox::context::AppContext;
use toolbox::logging::LogBuffer;
use toolbox::names::ROOT_PATH;
use tracing::warn;

mod app;
pub mod ext;
mod input;
mod render;

pub use ext::{PlaceholderPages, ToolPageRenderer};
pub use render::{Palette, log_level_style, palette, theme_glyph, truncate_str};

use app::App;
use input::handle_key_event;
use render::render;

/// Configuration for the TUI.
pub struct TuiConfig {
    /// Path opened on startup. Default: `/` (redirects to the default tool).
    pub initial_path: String,
    /// Renderer for tool page bodies.
    pub page_renderer: Box<dyn ToolPageRenderer>,
    /// Optional log buffer from the tracing layer.
    ///
    /// When set, the TUI drains pending log lines from this buffer once
    /// per frame into its log pane.
    pub log_buffer: Option<LogBuffer>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            initial_path: ROOT_PATH.to_string(),
            page_renderer: Box::new(PlaceholderPages),
            log_buffer: None,
        }
    }
}

/// Run the TUI event loop (blocking) until the user quits.
pub fn run_tui(ctx: &AppContext, config: &TuiConfig) -> io::Result<()> {
    if let Err(e) = ctx.navigate(&config.initial_path) {
        warn!("Initial navigation failed: {e}");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = event_loop(&mut terminal, ctx, config);

    // Restore terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    ctx: &AppContext,
    config: &TuiConfig,
) -> io::Result<()> {
    let mut app = App::new();

    while !app.should_quit {
        if let Some(ref log_buf) = config.log_buffer {
            log_buf.flush_into(&mut app.logs);
        }

        let mode = ctx.nav().mode();
        let len = app.visible_items(ctx, mode).len();
        app.clamp_selection(len);

        terminal.draw(|frame| {
            render(frame, ctx, &app, config.page_renderer.as_ref());
        })?;

        // Poll for input events (100ms timeout for responsive rendering).
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.status_message = None;
            handle_key_event(key, &mut app, ctx);
        }
    }
    Ok(())
}
