//! Rendering for the toolbox TUI.

use ratatui::prelude::*;
use ratatui::widgets::*;
use toolbox::catalog::MenuItem;
use toolbox::context::AppContext;
use toolbox::logging::{LogLevel, LogLine};
use toolbox::nav::{MenuMode, NavSnapshot};
use toolbox::routes::RouteEntry;
use toolbox::theme::Theme;

use crate::app::App;
use crate::ext::ToolPageRenderer;

/// Sidebar width when expanded / collapsed.
const SIDEBAR_WIDTH: u16 = 34;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

// ── Public Utilities ──────────────────────────────────────────────────

/// Truncate to at most `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

/// Map a log level to a ratatui [`Style`].
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Debug => Style::default().fg(Color::Cyan),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Colours used for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub selection: Color,
    pub background: Color,
}

/// Terminal colours standing in for the `data-theme` stylesheet.
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            accent: Color::Blue,
            text: Color::Reset,
            muted: Color::DarkGray,
            selection: Color::LightCyan,
            background: Color::Reset,
        },
        Theme::Dark => Palette {
            accent: Color::Magenta,
            text: Color::White,
            muted: Color::Gray,
            selection: Color::DarkGray,
            background: Color::Black,
        },
        Theme::Terminal => Palette {
            accent: Color::LightGreen,
            text: Color::Green,
            muted: Color::DarkGray,
            selection: Color::Rgb(0, 64, 0),
            background: Color::Black,
        },
    }
}

/// Glyph shown next to the theme name (the toggle button's icon).
pub fn theme_glyph(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "\u{2600}",
        Theme::Dark => "\u{263E}",
        Theme::Terminal => ">_",
    }
}

// ── Root Render ───────────────────────────────────────────────────────

/// Everything a frame needs, copied out of the shared context so no lock
/// is held while widgets are built.
struct RenderSnapshot<'a> {
    nav: NavSnapshot,
    theme: Theme,
    title: String,
    current: Option<RouteEntry>,
    items: Vec<&'a MenuItem>,
}

pub(crate) fn render(
    frame: &mut Frame,
    ctx: &AppContext,
    app: &App,
    pages: &dyn ToolPageRenderer,
) {
    let nav = ctx.nav().snapshot();
    let snap = RenderSnapshot {
        nav,
        theme: ctx.theme().current(),
        title: ctx.title(),
        current: ctx.navigator().current().cloned(),
        items: app.visible_items(ctx, nav.mode),
    };
    let colors = palette(snap.theme);

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background).fg(colors.text)),
        frame.area(),
    );

    // Outer layout: [1] header | [flex] body | [1] status line.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], &snap, colors);

    let sidebar_width = if snap.nav.collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(chunks[1]);

    if snap.nav.collapsed {
        render_collapsed_sidebar(frame, body[0], colors);
    } else {
        match snap.nav.mode {
            MenuMode::List => render_menu_list(frame, body[0], ctx, &snap, app, colors),
            MenuMode::Search => render_search(frame, body[0], &snap, app, colors),
        }
    }

    if app.show_logs {
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(body[1]);
        render_page(frame, main[0], ctx, &snap, pages, colors);
        render_logs(frame, main[1], &app.logs, app);
    } else {
        render_page(frame, body[1], ctx, &snap, pages, colors);
    }

    render_status_line(frame, chunks[2], &snap, app, colors);
}

// ── Header ────────────────────────────────────────────────────────────

fn render_header(frame: &mut Frame, area: Rect, snap: &RenderSnapshot<'_>, colors: Palette) {
    let theme_label = format!(
        " {} {} ({}) ",
        theme_glyph(snap.theme),
        snap.theme,
        snap.theme.icon()
    );
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", snap.title),
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(theme_label, Style::default().fg(colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// ── Sidebar ───────────────────────────────────────────────────────────

fn sidebar_block(title: &str, colors: Palette) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.muted))
        .title(title)
}

fn render_collapsed_sidebar(frame: &mut Frame, area: Rect, colors: Palette) {
    let hint = Paragraph::new(vec![
        Line::from(Span::styled("\u{2261}", Style::default().fg(colors.accent))),
        Line::from(Span::styled("/", Style::default().fg(colors.muted))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.muted)));
    frame.render_widget(hint, area);
}

fn item_line<'a>(item: &'a MenuItem, is_current: bool, colors: Palette) -> Line<'a> {
    let marker = if is_current { "\u{25B8} " } else { "  " };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(colors.accent)),
        Span::styled(item.label.as_str(), Style::default().fg(colors.text)),
    ])
}

fn render_menu_list(
    frame: &mut Frame,
    area: Rect,
    ctx: &AppContext,
    snap: &RenderSnapshot<'_>,
    app: &App,
    colors: Palette,
) {
    let current_route = snap.current.as_ref().map(|e| e.path.as_str());

    // Category headings are interleaved with items, so map the selected
    // item index to its row in the rendered list.
    let mut rows: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut item_index = 0usize;
    for group in ctx.catalog().grouped() {
        rows.push(ListItem::new(Line::from(Span::styled(
            group.category.label.clone(),
            Style::default().fg(colors.muted).add_modifier(Modifier::BOLD),
        ))));
        for item in group.items {
            if item_index == app.selected {
                selected_row = Some(rows.len());
            }
            let is_current = current_route == Some(item.route.as_str());
            rows.push(ListItem::new(item_line(item, is_current, colors)));
            item_index += 1;
        }
    }

    let list = List::new(rows)
        .block(sidebar_block(" Tools ", colors))
        .highlight_style(Style::default().bg(colors.selection));
    let mut state = ListState::default().with_selected(selected_row);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_search(
    frame: &mut Frame,
    area: Rect,
    snap: &RenderSnapshot<'_>,
    app: &App,
    colors: Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let focused = snap.nav.search_focused;
    let border = if focused { colors.accent } else { colors.muted };
    let cursor = if focused { "\u{2588}" } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(colors.accent)),
        Span::raw(app.search.query()),
        Span::styled(cursor, Style::default().fg(colors.accent)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search "),
    );
    frame.render_widget(input, chunks[0]);

    if snap.items.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No matching tools",
            Style::default().fg(colors.muted),
        ))
        .block(sidebar_block(" Results ", colors));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let desc_width = chunks[1].width.saturating_sub(6) as usize;
    let rows: Vec<ListItem> = snap
        .items
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    item.label.as_str(),
                    Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", truncate_str(&item.description, desc_width)),
                    Style::default().fg(colors.muted),
                )),
            ])
        })
        .collect();

    let title = format!(" Results ({}) ", snap.items.len());
    let list = List::new(rows)
        .block(sidebar_block(&title, colors))
        .highlight_style(Style::default().bg(colors.selection));
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

// ── Page Pane ─────────────────────────────────────────────────────────

fn render_page(
    frame: &mut Frame,
    area: Rect,
    ctx: &AppContext,
    snap: &RenderSnapshot<'_>,
    pages: &dyn ToolPageRenderer,
    colors: Palette,
) {
    let Some(entry) = &snap.current else {
        let empty = Paragraph::new("Select a tool from the sidebar.")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let item = ctx
        .catalog()
        .items()
        .iter()
        .find(|item| item.route == entry.path);

    let lines = pages
        .page_lines(entry.page, item)
        .unwrap_or_else(|| placeholder_lines(entry, item, colors));

    let title = format!(" {} ", entry.meta.title.as_deref().unwrap_or(&entry.name));
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.accent))
                .title(title),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn placeholder_lines(
    entry: &RouteEntry,
    item: Option<&MenuItem>,
    colors: Palette,
) -> Vec<Line<'static>> {
    let muted = Style::default().fg(colors.muted);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("route  ", muted),
            Span::raw(entry.path.clone()),
        ]),
        Line::from(vec![
            Span::styled("page   ", muted),
            Span::raw(format!("{:?}", entry.page)),
        ]),
    ];
    if let Some(tool_id) = &entry.meta.tool_id {
        lines.push(Line::from(vec![
            Span::styled("tool   ", muted),
            Span::raw(tool_id.clone()),
        ]));
    }
    if let Some(item) = item {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            item.description.clone(),
            Style::default().fg(colors.text),
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("aliases  ", muted),
            Span::raw(item.aliases.join(", ")),
        ]));
    }
    lines
}

// ── Logs Pane ─────────────────────────────────────────────────────────

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogLine], app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = logs
        .iter()
        .map(|log| {
            Line::from(vec![
                Span::styled(format!("{} ", log.time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{} ", log.level.label()), log_level_style(log.level)),
                Span::raw(log.message.as_str()),
            ])
        })
        .collect();

    let total = lines.len();
    let scroll = total
        .saturating_sub(inner_height)
        .saturating_sub(app.log_scroll);

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Log "))
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ── Status Line ───────────────────────────────────────────────────────

fn render_status_line(
    frame: &mut Frame,
    area: Rect,
    snap: &RenderSnapshot<'_>,
    app: &App,
    colors: Palette,
) {
    let text = match &app.status_message {
        Some(msg) => msg.clone(),
        None if snap.nav.search_focused => {
            "type to filter  [\u{2191}\u{2193}] select  [Enter] open  [Tab] unfocus  [Esc] close"
                .to_string()
        }
        None => {
            "[/] search  [\u{2191}\u{2193}] select  [Enter] open  [b] sidebar  [t] theme  [,] logs  [q] quit"
                .to_string()
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(colors.muted))),
        area,
    );
}
