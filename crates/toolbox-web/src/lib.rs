//! Browser-facing surface for the developer toolbox.
//!
//! `toolbox-web` provides an axum server that exposes a REST API for the
//! menu, search, sidebar and theme controls, and a WebSocket endpoint that
//! pushes every state change to connected browsers.
//!
//! # Quick start
//!
//! ```ignore
//! use toolbox::context::AppContext;
//! use toolbox_web::{WebConfig, spawn_web};
//!
//! let ctx = AppContext::global().clone();
//! let config = WebConfig::default();
//! let (ws_tx, _) = tokio::sync::broadcast::channel(config.broadcast_capacity);
//!
//! let addr = spawn_web(ctx, ws_tx, config).await?;
//! println!("Web UI: http://{addr}");
//! ```
//!
//! # Architecture
//!
//! ```text
//! AppContext observers ──▶ ShellBroadcaster ──WsMessage──▶ WebSocket clients
//!        ▲                                                        │
//!        └──── /api/nav, /api/navigate, /api/theme/cycle ◀────────┘
//! ```

mod api;
pub mod broadcast;
mod server;
pub mod snapshot;
mod ws;

pub use api::NavAction;
pub use broadcast::{ShellBroadcaster, WsMessage};
pub use snapshot::ShellSnapshot;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use toolbox::context::AppContext;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory with the static frontend build.
    ///
    /// If `None`, only API/WS endpoints are served.
    pub static_dir: Option<PathBuf>,
    /// Maximum WebSocket broadcast channel capacity. Default: 256.
    ///
    /// Clients that fall behind by this many messages receive a fresh
    /// state snapshot to resynchronize.
    pub broadcast_capacity: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
            broadcast_capacity: 256,
        }
    }
}

/// Spawn the web server on a Tokio task.
///
/// Attaches a [`ShellBroadcaster`] to `ctx` so that every change, from
/// whichever surface, reaches the WebSocket clients. The server runs until
/// the Tokio runtime shuts down.
///
/// # Arguments
///
/// * `ctx`: Shared shell state.
/// * `broadcast_tx`: Sender half of the WebSocket broadcast channel.
/// * `config`: Server configuration.
pub async fn spawn_web(
    ctx: AppContext,
    broadcast_tx: tokio::sync::broadcast::Sender<WsMessage>,
    config: WebConfig,
) -> io::Result<SocketAddr> {
    ShellBroadcaster::new(broadcast_tx.clone()).attach(&ctx);
    let router = server::build_router(ctx, broadcast_tx, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
