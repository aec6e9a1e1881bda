//! WebSocket upgrade handler and message dispatch.
//!
//! Each connected client receives:
//! 1. A full [`ShellSnapshot`] on connect.
//! 2. Incremental [`WsMessage`] updates as the shell state changes.
//!
//! Clients can send JSON commands back (navigate, sidebar, theme).

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt, stream::SplitSink};
use serde::Deserialize;
use tokio::sync::broadcast;
use toolbox::context::AppContext;
use tracing::{debug, warn};

use crate::api::NavAction;
use crate::broadcast::WsMessage;
use crate::snapshot::ShellSnapshot;

/// Shared state for WebSocket handlers.
#[derive(Clone)]
pub struct WsState {
    pub ctx: AppContext,
    pub broadcast_tx: broadcast::Sender<WsMessage>,
}

/// GET /ws: WebSocket upgrade handler.
pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(ws_state): State<WsState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, ws_state))
}

/// Handle a single WebSocket connection.
async fn handle_socket(socket: WebSocket, ws_state: WsState) {
    let (mut sink, mut stream) = socket.split();

    // Subscribe before the snapshot so no change slips between the two.
    let mut broadcast_rx = ws_state.broadcast_tx.subscribe();

    let snapshot_msg = WsMessage::Snapshot {
        data: ShellSnapshot::from_context(&ws_state.ctx),
    };
    if ws_send(&mut sink, &snapshot_msg).await.is_err() {
        return;
    }

    debug!("WebSocket client connected");

    // Spawn a task that forwards broadcast messages to this client.
    let ctx_for_resync = ws_state.ctx.clone();
    let forward_task = tokio::spawn(async move {
        loop {
            match broadcast_rx.recv().await {
                Ok(msg) => {
                    if ws_send(&mut sink, &msg).await.is_err() {
                        break; // Client disconnected.
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("WebSocket client lagged by {n} messages, resending snapshot");
                    let msg = WsMessage::Snapshot {
                        data: ShellSnapshot::from_context(&ctx_for_resync),
                    };
                    if ws_send(&mut sink, &msg).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Handle incoming messages from this client.
    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => handle_client_message(&text, &ws_state.ctx),
            Message::Close(_) => break,
            _ => {} // Ignore binary, ping, pong.
        }
    }

    debug!("WebSocket client disconnected");
    forward_task.abort();
}

/// Commands a client may send.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    Navigate { path: String },
    Open { id: String },
    Nav { action: NavAction },
    CycleTheme,
}

/// Process a JSON message received from a client.
///
/// Results are not answered directly; every client, the sender included,
/// sees the change through the broadcast channel.
fn handle_client_message(text: &str, ctx: &AppContext) {
    let Ok(msg) = serde_json::from_str::<ClientMessage>(text) else {
        debug!("Ignoring malformed WebSocket message");
        return;
    };

    let result = match msg {
        ClientMessage::Navigate { path } => ctx.navigate(&path).map(drop),
        ClientMessage::Open { id } => ctx.open_item(&id).map(drop),
        ClientMessage::Nav { action } => {
            action.apply(&mut ctx.nav());
            Ok(())
        }
        ClientMessage::CycleTheme => {
            ctx.cycle_theme();
            Ok(())
        }
    };
    if let Err(e) = result {
        warn!("WebSocket command failed: {e}");
    }
}

/// Serialize a `WsMessage` and send it over the WebSocket sink.
async fn ws_send(sink: &mut SplitSink<WebSocket, Message>, msg: &WsMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).unwrap_or_default();
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}
