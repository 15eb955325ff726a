// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket round trips against a bound gateway.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::state;
use futures::{SinkExt, StreamExt};
use quill_gateway::{GatewayState, router};
use quill_test_utils::MockProvider;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn serve(state: GatewayState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("ws://{addr}/ws")
}

async fn next_reply(client: &mut Client) -> serde_json::Value {
    let deadline = Duration::from_secs(5);
    loop {
        let msg = tokio::time::timeout(deadline, client.next())
            .await
            .expect("reply within deadline")
            .expect("socket open")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn wait_for_connections(state: &GatewayState, expected: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while state.connections.load(Ordering::SeqCst) != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("connection count settles");
}

#[tokio::test]
async fn replies_follow_request_order_and_skip_binary_frames() {
    let provider = MockProvider::with_responses(vec!["first reply".into(), "second reply".into()]);
    let (state, _dir) = state(provider.clone(), None).await;
    let url = serve(state.clone()).await;

    let (mut client, _) = connect_async(url.as_str()).await.unwrap();
    client.send(Message::Text("Once upon a time".into())).await.unwrap();
    client.send(Message::Binary(vec![1u8, 2, 3].into())).await.unwrap();
    client.send(Message::Text("And then".into())).await.unwrap();

    let first = next_reply(&mut client).await;
    let second = next_reply(&mut client).await;
    assert_eq!(first["suggestion"], "first reply");
    assert_eq!(second["suggestion"], "second reply");
    assert_eq!(second["usage_summary"]["total_requests"], 2);

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests[0].user_prompt.ends_with("Once upon a time"));
    assert!(requests[1].user_prompt.ends_with("And then"));
}

#[tokio::test]
async fn oversized_and_short_frames_get_replies_without_model_calls() {
    let provider = MockProvider::new();
    let (state, _dir) = state(provider.clone(), None).await;
    let url = serve(state).await;

    let (mut client, _) = connect_async(url.as_str()).await.unwrap();
    client.send(Message::Text("x".repeat(65).into())).await.unwrap();
    client.send(Message::Text("ab".into())).await.unwrap();

    let oversized = next_reply(&mut client).await;
    assert_eq!(oversized["suggestion"], "");
    assert!(oversized["error"].as_str().unwrap().contains("too large"));
    assert_eq!(next_reply(&mut client).await, serde_json::json!({"suggestion": ""}));
    assert_eq!(provider.call_count().await, 0);
}

#[tokio::test]
async fn connection_count_rises_and_falls() {
    let (state, _dir) = state(MockProvider::new(), None).await;
    let url = serve(state.clone()).await;

    let (mut first, _) = connect_async(url.as_str()).await.unwrap();
    let (mut second, _) = connect_async(url.as_str()).await.unwrap();
    wait_for_connections(&state, 2).await;

    first.close(None).await.unwrap();
    wait_for_connections(&state, 1).await;

    // The remaining socket keeps working.
    second.send(Message::Text("still here".into())).await.unwrap();
    assert_eq!(next_reply(&mut second).await["suggestion"], "mock response");

    second.close(None).await.unwrap();
    wait_for_connections(&state, 0).await;
}
