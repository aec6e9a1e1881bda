//! State observers that convert shell changes into WebSocket messages.
//!
//! [`ShellBroadcaster`] hooks into the nav state, the theme preference and
//! the navigator of an [`AppContext`], serializes each change into a
//! [`WsMessage`] and pushes it to every connected client through a
//! `tokio::sync::broadcast` channel. Changes made from any surface (REST,
//! WebSocket, or an embedding TUI sharing the context) reach all clients.

use serde::Serialize;
use tokio::sync::broadcast;
use toolbox::context::AppContext;
use toolbox::nav::NavSnapshot;
use toolbox::routes::{FnObserver, RouteEntry};
use toolbox::theme::Theme;

use crate::snapshot::ShellSnapshot;

/// A message sent from the server to WebSocket clients.
///
/// Discriminated on the `type` field when serialized to JSON.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Full state snapshot (sent on connect and after a client lags).
    Snapshot { data: ShellSnapshot },
    /// Sidebar flags changed.
    Nav { state: NavSnapshot },
    /// Theme changed.
    Theme { theme: Theme, icon: &'static str },
    /// A navigation completed.
    Navigated {
        path: String,
        name: String,
        title: String,
    },
}

/// Broadcasts context changes to WebSocket clients.
pub struct ShellBroadcaster {
    sender: broadcast::Sender<WsMessage>,
}

impl ShellBroadcaster {
    pub fn new(sender: broadcast::Sender<WsMessage>) -> Self {
        Self { sender }
    }

    /// Register observers on `ctx` that forward every change.
    ///
    /// Send errors are ignored: no connected clients is fine.
    pub fn attach(&self, ctx: &AppContext) {
        let tx = self.sender.clone();
        ctx.nav().subscribe(move |state| {
            let _ = tx.send(WsMessage::Nav { state: *state });
        });

        let tx = self.sender.clone();
        ctx.theme().subscribe(move |theme| {
            let _ = tx.send(WsMessage::Theme {
                theme: *theme,
                icon: theme.icon(),
            });
        });

        // The title observer runs first, so the title is current here.
        let tx = self.sender.clone();
        let title = ctx.document_title();
        ctx.navigator()
            .add_observer(FnObserver(move |entry: &RouteEntry| {
                let _ = tx.send(WsMessage::Navigated {
                    path: entry.path.clone(),
                    name: entry.name.clone(),
                    title: title.get(),
                });
            }));
    }
}
