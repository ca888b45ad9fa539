//! Live (WebSocket) connections.
//!
//! # Responsibilities
//! - Upgrade `/live/websocket?path=...` requests
//! - Mount a `LiveSession` on the page path the client reports
//! - Check every rendered assigns frame against the scope schema
//!
//! # Protocol
//! ```text
//! server → {"event":"mounted","scope":"/fr","assigns":{...}}
//! client → {"event":"render","assigns":{...}}
//! server → {"event":"verified"}
//! client → {"event":"navigate","path":"/nl/about"}
//! server → {"event":"mounted",...}
//! server → {"event":"error","error":"..."} then close
//! ```
//!
//! # Design Decisions
//! - WebSocket handled separately from HTTP request/response
//! - Any lifecycle error closes the socket; the session cannot recover

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::live::{LifecycleError, LiveSession};
use crate::localized::Localized;
use crate::resolve::ResolvedScope;
use crate::scope::AssignMap;

/// Query parameters of the upgrade request.
#[derive(Debug, Deserialize)]
pub struct LiveParams {
    /// Page path (or URL) the connection belongs to.
    pub path: String,
}

/// Frames sent by the client.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ClientEvent {
    Render { assigns: AssignMap },
    Navigate { path: String },
}

type Sender = SplitSink<WebSocket, Message>;

pub async fn live_socket(
    ws: WebSocketUpgrade,
    State(localized): State<Localized>,
    Query(params): Query<LiveParams>,
) -> Response {
    ws.on_upgrade(move |socket| run_session(socket, localized, params.path))
}

async fn run_session(socket: WebSocket, localized: Localized, path: String) {
    let (mut sender, mut receiver) = socket.split();
    let mut session = LiveSession::new(localized);

    if !mount(&mut session, &mut sender, &path).await {
        return;
    }

    while let Some(frame) = receiver.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(error = %e, "Live socket read failed");
                break;
            }
        };

        let event: ClientEvent = match serde_json::from_str(text.as_str()) {
            Ok(event) => event,
            Err(e) => {
                let _ = send(&mut sender, json!({ "event": "error", "error": e.to_string() })).await;
                continue;
            }
        };

        match event {
            ClientEvent::Render { assigns } => match session.verify(assigns.keys()) {
                Ok(()) => {
                    if send(&mut sender, json!({ "event": "verified" })).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    fail(&mut sender, e).await;
                    break;
                }
            },
            ClientEvent::Navigate { path } => {
                if !mount(&mut session, &mut sender, &path).await {
                    break;
                }
            }
        }
    }
    tracing::debug!("Live session closed");
}

/// Mount (or remount) the session; false once the socket is closed.
async fn mount(session: &mut LiveSession, sender: &mut Sender, path: &str) -> bool {
    match session.mount(path) {
        Ok(resolved) => send(sender, mounted(&resolved)).await.is_ok(),
        Err(e) => {
            fail(sender, e).await;
            false
        }
    }
}

fn mounted(resolved: &ResolvedScope) -> Value {
    json!({
        "event": "mounted",
        "scope": resolved.scope.path(),
        "path": resolved.raw_path,
        "assigns": resolved.scope.assigns,
    })
}

async fn fail(sender: &mut Sender, error: LifecycleError) {
    tracing::warn!(error = %error, "Live session failed");
    let _ = send(sender, json!({ "event": "error", "error": error.to_string() })).await;
    let _ = sender.send(Message::Close(None)).await;
}

async fn send(sender: &mut Sender, value: Value) -> Result<(), axum::Error> {
    sender.send(Message::Text(value.to_string().into())).await
}
