//! WebSocket push channel.
//!
//! # Protocol
//! ```text
//! client → {"event": "client/data"}
//! server → {"event": "client/data", "data": {"selfId": ..., "type": ..., "content": ...}}
//!
//! no listener for the event:
//! server → {"event": "other", "error": "no listener registered"}
//! ```
//!
//! # Design Decisions
//! - Each frame is answered before the next is read
//! - Bad frames get an error reply; the session stays open
//! - Ping/pong handled by axum
//! - Sessions close when the server shuts down

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::delivery::Data;
use crate::host::Console;
use crate::http::server::AppState;

/// Push request sent by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    pub event: String,
}

/// Reply to one push request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushReply {
    pub event: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PushReply {
    fn error(event: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let closing = state.closing.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, state, closing))
}

/// Answer one text frame.
pub fn handle_frame(console: &Console, text: &str) -> PushReply {
    let request: PushRequest = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => return PushReply::error("", format!("invalid request: {e}")),
    };

    match console.events.emit(&request.event) {
        Some(data) => PushReply {
            event: request.event,
            data: Some(data),
            error: None,
        },
        None => PushReply::error(request.event, "no listener registered"),
    }
}

async fn handle_socket(mut socket: WebSocket, state: AppState, mut closing: broadcast::Receiver<()>) {
    let session_id = Uuid::new_v4();
    tracing::info!(session_id = %session_id, "WebSocket session opened");

    loop {
        let message = tokio::select! {
            _ = closing.recv() => {
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
            message = socket.recv() => message,
        };

        let text = match message {
            Some(Ok(Message::Text(text))) => text.as_str().to_owned(),
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => text,
                Err(_) => {
                    let reply = PushReply::error("", "binary frames must be UTF-8 JSON");
                    if send_reply(&mut socket, &reply).await.is_err() {
                        break;
                    }
                    continue;
                }
            },
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                tracing::warn!(session_id = %session_id, error = %e, "WebSocket receive error");
                break;
            }
        };

        let reply = handle_frame(&state.console, &text);
        if let Some(error) = &reply.error {
            tracing::debug!(session_id = %session_id, event = %reply.event, error = %error, "Push request rejected");
        }
        if send_reply(&mut socket, &reply).await.is_err() {
            break;
        }
    }

    tracing::info!(session_id = %session_id, "WebSocket session closed");
}

async fn send_reply(socket: &mut WebSocket, reply: &PushReply) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(reply) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode push reply");
            return Ok(());
        }
    };
    socket.send(Message::Text(text.into())).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to send WebSocket reply");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{validate, ConsoleConfig};
    use crate::delivery::{DataType, DATA_EVENT};
    use crate::plugin;
    use serde_json::json;

    fn console(raw: serde_json::Value) -> Console {
        let console = Console::new();
        plugin::apply(&console, validate(&raw).unwrap(), &ConsoleConfig::default());
        console
    }

    #[test]
    fn test_frame_passive() {
        let console = console(json!({ "selfId": "bot1", "passiveMode": true, "injectType": "iframe", "showUrl": "https://x.test" }));

        let reply = handle_frame(&console, r#"{"event":"client/data"}"#);
        assert_eq!(reply.event, DATA_EVENT);
        let data = reply.data.unwrap();
        assert_eq!(data.data_type, DataType::Iframe);
        assert_eq!(data.content, "https://x.test");
    }

    #[test]
    fn test_frame_active_mode_is_suppressed() {
        let console = console(json!({ "selfId": "bot1", "injectType": "text", "showText": "hello" }));
        let reply = handle_frame(&console, r#"{"event":"client/data"}"#);
        assert!(reply.error.is_none());
        assert_eq!(reply.data, Some(Data::suppressed("bot1")));
    }

    #[test]
    fn test_frame_without_listener() {
        let console = console(json!({ "selfId": "bot1", "injectType": "text" }));
        let reply = handle_frame(&console, r#"{"event":"client/other"}"#);
        assert_eq!(reply.event, "client/other");
        assert!(reply.data.is_none());
        assert_eq!(reply.error.as_deref(), Some("no listener registered"));
    }

    #[test]
    fn test_frame_malformed() {
        let console = Console::new();
        let reply = handle_frame(&console, "client/data");
        assert!(reply.error.unwrap().starts_with("invalid request"));
    }

    #[test]
    fn test_reply_wire_shape() {
        let reply = PushReply {
            event: DATA_EVENT.to_string(),
            data: Some(Data::suppressed("x")),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({ "event": "client/data", "data": { "selfId": "x", "type": "null", "content": "null" } })
        );
    }
}
