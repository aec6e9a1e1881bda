//! Developer toolbox in the terminal.
//!
//! # Examples
//!
//! ```sh
//! toolbox-tui
//! toolbox-tui --path /tool/diff-viewer
//! toolbox-tui --prefs ./prefs.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use toolbox::config::{PrefsLocation, ShellConfig};
use toolbox::context::AppContext;
use toolbox::logging::ShellTracingLayer;
use toolbox_tui::{TuiConfig, run_tui};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Developer toolbox in the terminal.
#[derive(Parser)]
#[command(name = "toolbox-tui")]
struct Cli {
    /// Path to open on startup.
    #[arg(long, default_value = "/")]
    path: String,

    /// Preferences file (default: <config dir>/toolbox/preferences.json).
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Keep preferences in memory only.
    #[arg(long, conflicts_with = "prefs")]
    no_persist: bool,
}

fn main() {
    let cli = Cli::parse();

    // Tracing → TUI log buffer.
    let (tracing_layer, log_buffer) = ShellTracingLayer::new();
    tracing_subscriber::registry().with(tracing_layer).init();

    let prefs = match (&cli.prefs, cli.no_persist) {
        (_, true) => PrefsLocation::Memory,
        (Some(path), false) => PrefsLocation::File(path.clone()),
        (None, false) => PrefsLocation::Default,
    };
    let config = ShellConfig {
        prefs,
        ..Default::default()
    };

    let ctx = match AppContext::init_global(AppContext::from_config(&config)) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let tui_config = TuiConfig {
        initial_path: cli.path,
        log_buffer: Some(log_buffer),
        ..Default::default()
    };

    if let Err(e) = run_tui(ctx, &tui_config) {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
