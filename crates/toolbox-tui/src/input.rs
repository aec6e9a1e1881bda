//! Keyboard handling for the toolbox TUI.
//!
//! Two contexts: while the search box has focus, printable keys edit the
//! query; otherwise single-key shortcuts apply.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use toolbox::context::AppContext;
use toolbox::nav::MenuMode;

use crate::app::App;

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, ctx: &AppContext) {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Shortcuts that work in every context.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('k') => {
                enter_search(app, ctx);
                return;
            }
            KeyCode::Char('b') => {
                ctx.nav().toggle_collapsed();
                return;
            }
            _ => {}
        }
    }

    let (mode, focused) = {
        let nav = ctx.nav();
        (nav.mode(), nav.search_focused())
    };

    if focused {
        handle_search_key(key, app, ctx, mode);
    } else {
        handle_normal_key(key, app, ctx, mode);
    }
}

fn handle_normal_key(key: KeyEvent, app: &mut App, ctx: &AppContext, mode: MenuMode) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('/') => enter_search(app, ctx),
        KeyCode::Char('b') => ctx.nav().toggle_collapsed(),
        KeyCode::Char('t') => {
            let theme = ctx.cycle_theme();
            app.status_message = Some(format!("Theme: {theme}"));
        }
        KeyCode::Char(',') => app.show_logs = !app.show_logs,
        KeyCode::Char('i') if mode == MenuMode::Search => {
            ctx.nav().set_search_focused(true);
        }
        KeyCode::Up | KeyCode::Char('k') => move_selection(app, ctx, mode, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(app, ctx, mode, 1),
        KeyCode::PageUp => app.log_scroll = app.log_scroll.saturating_add(10),
        KeyCode::PageDown => app.log_scroll = app.log_scroll.saturating_sub(10),
        KeyCode::End => app.log_scroll = 0,
        KeyCode::Enter => open_selected(app, ctx, mode),
        KeyCode::Esc if mode == MenuMode::Search => leave_search(app, ctx),
        _ => {}
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App, ctx: &AppContext, mode: MenuMode) {
    match key.code {
        KeyCode::Esc => leave_search(app, ctx),
        KeyCode::Enter => open_selected(app, ctx, mode),
        // Keep search mode but give the keyboard back to shortcuts.
        KeyCode::Tab => ctx.nav().set_search_focused(false),
        KeyCode::Up => move_selection(app, ctx, mode, -1),
        KeyCode::Down => move_selection(app, ctx, mode, 1),
        KeyCode::Backspace => {
            app.search.pop_char();
            app.selected = 0;
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.search.push_char(c);
            app.selected = 0;
        }
        _ => {}
    }
}

fn enter_search(app: &mut App, ctx: &AppContext) {
    ctx.nav().focus_search();
    app.selected = 0;
    app.status_message = None;
}

fn leave_search(app: &mut App, ctx: &AppContext) {
    app.search.clear();
    app.selected = 0;
    let mut nav = ctx.nav();
    nav.set_search_focused(false);
    nav.set_mode(MenuMode::List);
}

fn move_selection(app: &mut App, ctx: &AppContext, mode: MenuMode, delta: isize) {
    let len = app.visible_items(ctx, mode).len();
    if len == 0 {
        app.selected = 0;
        return;
    }
    app.selected = app.selected.saturating_add_signed(delta).min(len - 1);
}

fn open_selected(app: &mut App, ctx: &AppContext, mode: MenuMode) {
    let id = {
        let items = app.visible_items(ctx, mode);
        match items.get(app.selected) {
            Some(item) => item.id.clone(),
            None => {
                app.status_message = Some("No tool selected.".into());
                return;
            }
        }
    };

    match ctx.open_item(&id) {
        Ok(_) => {
            // Navigation already put the sidebar back in list mode; drop the
            // query and focus, then highlight the opened tool in the list.
            ctx.nav().set_search_focused(false);
            app.search.clear();
            app.selected = app
                .visible_items(ctx, MenuMode::List)
                .iter()
                .position(|item| item.id == id)
                .unwrap_or(0);
            app.status_message = Some(format!("Opened {}", ctx.title()));
        }
        Err(e) => app.status_message = Some(format!("Error: {e}")),
    }
}
