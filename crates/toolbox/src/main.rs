//! Query the toolbox catalog and drive its persisted shell state from the
//! command line.
//!
//! # Examples
//!
//! ```sh
//! # Sidebar menu, grouped by category
//! toolbox list
//! toolbox categories
//!
//! # Same filter the sidebar search box applies
//! toolbox search format
//! toolbox --json search 預覽
//!
//! # Resolve a path the way the router does, and show the resulting title
//! toolbox navigate /tool/markdown-tool
//!
//! # Persisted preferences
//! toolbox theme cycle
//! toolbox sidebar toggle
//! toolbox --prefs ./prefs.json theme set terminal
//! ```

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use toolbox::catalog::Catalog;
use toolbox::config::{PrefsLocation, ShellConfig};
use toolbox::context::AppContext;
use toolbox::nav::NavSnapshot;
use toolbox::theme::Theme;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// Developer toolbox shell.
#[derive(Parser)]
#[command(name = "toolbox")]
struct Cli {
    /// Preferences file (default: <config dir>/toolbox/preferences.json)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Keep preferences in memory only
    #[arg(long, global = true, conflicts_with = "prefs")]
    no_persist: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every tool, grouped by category
    List,
    /// Filter tools by label, alias or description
    Search {
        /// Case-insensitive substring; empty lists everything
        #[arg(default_value = "")]
        query: String,
    },
    /// Show one tool by id
    Show { id: String },
    /// List categories with their item counts
    Categories,
    /// Print the route table
    Routes,
    /// Resolve a path and print the page and title it produces
    Navigate { path: String },
    /// Sidebar collapse / search-mode state
    Sidebar {
        #[command(subcommand)]
        action: SidebarAction,
    },
    /// Colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Check that every menu item points at a known category and route
    Validate,
}

#[derive(Subcommand)]
enum SidebarAction {
    /// Print the current state
    Show,
    /// Flip the collapsed flag
    Toggle,
    /// Expand the sidebar and enter search mode
    FocusSearch,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Advance light → dark → terminal → light
    Cycle,
    /// Set a theme by name
    Set { name: String },
}

#[derive(Serialize)]
struct ThemeReport {
    theme: Theme,
    icon: &'static str,
}

impl From<Theme> for ThemeReport {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            icon: theme.icon(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
struct CategoryRow<'a> {
    id: &'a str,
    label: &'a str,
    icon: Option<&'a str>,
    items: usize,
}

fn category_rows(catalog: &Catalog) -> Vec<CategoryRow<'_>> {
    catalog
        .categories()
        .iter()
        .map(|c| CategoryRow {
            id: &c.id,
            label: &c.label,
            icon: c.icon.as_deref(),
            items: catalog.get_menu_items_by_category(&c.id).len(),
        })
        .collect()
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(level))
        .init();
}

fn shell_config(cli: &Cli) -> ShellConfig {
    let prefs = if cli.no_persist {
        PrefsLocation::Memory
    } else if let Some(path) = &cli.prefs {
        PrefsLocation::File(path.clone())
    } else {
        PrefsLocation::Default
    };
    ShellConfig {
        prefs,
        ..Default::default()
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let ctx = AppContext::init_global(AppContext::from_config(&shell_config(cli)))?;

    match &cli.command {
        Command::List => {
            let groups = ctx.catalog().grouped();
            if cli.json {
                return print_json(&groups);
            }
            for group in groups {
                println!("{}  ({})", group.category.label, group.category.id);
                for item in group.items {
                    println!("  {:<20} {:<16} {}", item.id, item.label, item.route);
                }
            }
        }
        Command::Search { query } => {
            let hits = ctx.search(query);
            if cli.json {
                return print_json(&hits);
            }
            if hits.is_empty() {
                println!("No tools match '{query}'.");
            }
            for item in hits {
                println!("{:<20} {:<16} {}", item.id, item.label, item.description);
            }
        }
        Command::Show { id } => {
            let item = ctx
                .catalog()
                .get_menu_item_by_id(id)
                .ok_or_else(|| format!("no tool with id '{id}'"))?;
            if cli.json {
                return print_json(item);
            }
            let category = ctx
                .catalog()
                .get_category(&item.category)
                .map_or(item.category.as_str(), |c| c.label.as_str());
            println!("{} ({})", item.label, item.id);
            println!("  category:    {category}");
            println!("  route:       {}", item.route);
            println!("  icon:        {}", item.icon);
            println!("  aliases:     {}", item.aliases.join(", "));
            println!("  description: {}", item.description);
        }
        Command::Categories => {
            let rows = category_rows(ctx.catalog());
            if cli.json {
                return print_json(&rows);
            }
            for row in rows {
                println!(
                    "{:<12} {:<10} {:<22} {} tool(s)",
                    row.id,
                    row.label,
                    row.icon.unwrap_or("-"),
                    row.items
                );
            }
        }
        Command::Routes => {
            let navigator = ctx.navigator();
            let table = navigator.table();
            if cli.json {
                return print_json(table);
            }
            let redirect = table.root_redirect();
            println!("{:<28} -> {}", redirect.from, redirect.to);
            for entry in table.entries() {
                println!(
                    "{:<28}    {} ({})",
                    entry.path,
                    entry.meta.title.as_deref().unwrap_or("-"),
                    entry.name
                );
            }
        }
        Command::Navigate { path } => {
            let navigation = ctx.navigate(path)?;
            if cli.json {
                return print_json(&serde_json::json!({
                    "navigation": navigation,
                    "title": ctx.title(),
                }));
            }
            if navigation.redirected {
                println!("{path} -> {}", navigation.entry.path);
            }
            println!("page:  {:?}", navigation.entry.page);
            println!("title: {}", ctx.title());
        }
        Command::Sidebar { action } => {
            let snapshot: NavSnapshot = {
                let mut nav = ctx.nav();
                match action {
                    SidebarAction::Show => {}
                    SidebarAction::Toggle => nav.toggle_collapsed(),
                    SidebarAction::FocusSearch => nav.focus_search(),
                }
                nav.snapshot()
            };
            if cli.json {
                return print_json(&snapshot);
            }
            println!("collapsed:      {}", snapshot.collapsed);
            println!("mode:           {:?}", snapshot.mode);
            println!("search focused: {}", snapshot.search_focused);
        }
        Command::Theme { action } => {
            let theme = match action {
                None | Some(ThemeAction::Show) => ctx.theme().current(),
                Some(ThemeAction::Cycle) => ctx.cycle_theme(),
                Some(ThemeAction::Set { name }) => {
                    let theme = Theme::parse(name).ok_or_else(|| {
                        format!("unknown theme '{name}' (expected light, dark or terminal)")
                    })?;
                    ctx.theme().set(theme);
                    theme
                }
            };
            if cli.json {
                return print_json(&ThemeReport::from(theme));
            }
            println!("{theme} ({})", theme.icon());
        }
        Command::Validate => match ctx.validate() {
            Ok(()) => println!("OK: every menu item resolves to a category and a route."),
            Err(problems) => {
                return Err(format!(
                    "{} problem(s):\n  {}",
                    problems.len(),
                    problems.join("\n  ")
                ));
            }
        },
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
