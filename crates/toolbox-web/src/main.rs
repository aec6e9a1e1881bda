//! Serve the developer toolbox to a browser.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p toolbox-web
//! cargo run -p toolbox-web -- --port 8080 --static-dir ./web/out
//! ```
//!
//! Then open the printed URL, or use curl / wscat:
//!
//! ```json
//! {"type": "navigate", "path": "/tool/diff-viewer"}
//! ```

use std::path::PathBuf;

use clap::Parser;
use toolbox::config::{PrefsLocation, ShellConfig};
use toolbox::context::AppContext;
use toolbox_web::{WebConfig, WsMessage, spawn_web};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Developer toolbox web server.
#[derive(Parser)]
#[command(about = "Serve the developer toolbox over HTTP and WebSocket")]
struct Args {
    /// Port for the web server.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Directory with the static frontend build.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Preferences file (default: <config dir>/toolbox/preferences.json).
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Keep preferences in memory only.
    #[arg(long, conflicts_with = "prefs")]
    no_persist: bool,

    /// Log debug output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();

    // 1. Shared shell state.
    let prefs = match (args.prefs, args.no_persist) {
        (_, true) => PrefsLocation::Memory,
        (Some(path), false) => PrefsLocation::File(path),
        (None, false) => PrefsLocation::Default,
    };
    let shell_config = ShellConfig {
        prefs,
        ..Default::default()
    };
    let ctx = AppContext::init_global(AppContext::from_config(&shell_config))?;

    // 2. Spawn the web server.
    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir: args.static_dir,
        ..Default::default()
    };
    let (ws_tx, _) = tokio::sync::broadcast::channel::<WsMessage>(web_config.broadcast_capacity);
    let addr = spawn_web(ctx.clone(), ws_tx, web_config)
        .await
        .map_err(|e| format!("Failed to start web server: {e}"))?;
    info!("Web UI: http://{addr}");
    println!("Web UI: http://{addr}");

    // 3. Serve until interrupted.
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to wait for Ctrl+C: {e}"))?;
    info!("Shutting down");
    Ok(())
}
