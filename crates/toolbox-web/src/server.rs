//! Axum server setup and router construction.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::{get, post};
use tokio::sync::broadcast;
use toolbox::context::AppContext;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;

use crate::api::{self, AppState};
use crate::broadcast::WsMessage;
use crate::ws::{self, WsState};

/// Build the full axum router.
///
/// The router serves:
/// - WebSocket at `/ws`
/// - REST API at `/api/*`
/// - Optional static files for the browser frontend
pub fn build_router(
    ctx: AppContext,
    broadcast_tx: broadcast::Sender<WsMessage>,
    static_dir: Option<PathBuf>,
) -> Router {
    let app_state = AppState { ctx: ctx.clone() };
    let ws_state = WsState { ctx, broadcast_tx };

    // CORS layer for development (frontend dev server on a different port).
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // WebSocket routes (own state type).
    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .with_state(ws_state);

    // REST API routes (own state type).
    let api_routes = Router::new()
        .route("/api/menu", get(api::get_menu))
        .route("/api/search", get(api::get_search))
        .route("/api/state", get(api::get_state))
        .route("/api/nav", post(api::post_nav))
        .route("/api/navigate", post(api::post_navigate))
        .route("/api/open", post(api::post_open))
        .route("/api/theme/cycle", post(api::post_theme_cycle))
        .with_state(app_state);

    let mut router = Router::new().merge(ws_routes).merge(api_routes).layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Bind `bind_addr`, serve `router` on a background task, and return the
/// bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Web server stopped: {e}");
        }
    });

    Ok(addr)
}
