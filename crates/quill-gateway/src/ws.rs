// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for suggestion requests.
//!
//! Client -> Server: one UTF-8 text frame of raw text per request.
//!
//! Server -> Client (JSON), one per text frame, in request order:
//! ```json
//! {"suggestion": "jumps over the lazy dog", "usage": {...}, "usage_summary": {...}}
//! {"suggestion": "", "error": "...", "rate_limited": true}
//! ```

use std::sync::atomic::Ordering;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use quill_pipeline::SuggestOutcome;
use quill_prometheus::set_active_connections;

use crate::server::GatewayState;

/// Characters of an incoming frame echoed to the log.
const LOG_PREVIEW_CHARS: usize = 20;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
///
/// Frames are answered one at a time so replies keep request order.
async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let total = state.connections.fetch_add(1, Ordering::SeqCst) + 1;
    set_active_connections(total);
    tracing::info!(total, "client connected");

    while let Some(msg) = ws_receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "WebSocket receive error");
                break;
            }
        };
        match msg {
            Message::Text(text) => {
                let reply = reply_for(&state, text.as_str()).await;
                if ws_sender.send(Message::Text(reply.into())).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {} // Ignore binary, ping (handled by tungstenite layer)
        }
    }

    let remaining = state.connections.fetch_sub(1, Ordering::SeqCst) - 1;
    set_active_connections(remaining);
    tracing::info!(remaining, "client disconnected");
}

/// Serialized reply for one text frame.
pub async fn reply_for(state: &GatewayState, text: &str) -> String {
    let outcome = if text.len() > state.max_frame_bytes {
        tracing::warn!(
            bytes = text.len(),
            limit = state.max_frame_bytes,
            "frame too large, rejecting"
        );
        SuggestOutcome::Failed {
            error: format!(
                "message too large ({} bytes, limit {})",
                text.len(),
                state.max_frame_bytes
            ),
        }
    } else {
        tracing::info!(text = %preview(text), "received text");
        state.pipeline.suggest(text).await
    };

    serde_json::to_string(&outcome).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize reply");
        r#"{"suggestion":""}"#.to_string()
    })
}

fn preview(text: &str) -> String {
    if text.chars().count() > LOG_PREVIEW_CHARS {
        let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
