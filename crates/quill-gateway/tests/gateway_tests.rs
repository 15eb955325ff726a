// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests for the gateway endpoints.

mod common;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::state;
use quill_gateway::{GatewayState, router, ws::reply_for};
use quill_test_utils::MockProvider;
use tower::ServiceExt;

async fn get_json(state: GatewayState, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_version_and_uptime() {
    let (state, _dir) = state(MockProvider::new(), None).await;
    let (status, body) = get_json(state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_secs"].is_u64());
}

#[tokio::test]
async fn usage_lists_calls_newest_first() {
    let provider = MockProvider::with_responses(vec!["one".into(), "two".into()]);
    let (state, _dir) = state(provider, None).await;

    reply_for(&state, "first request").await;
    reply_for(&state, "second request").await;

    let (status, body) = get_json(state, "/api/usage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_requests"], 2);
    let calls = body["api_calls"].as_array().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(calls[0]["timestamp"].as_str().unwrap() >= calls[1]["timestamp"].as_str().unwrap());
    assert!(body["requests_by_date"].is_object());
}

#[tokio::test]
async fn metrics_disabled_is_not_found() {
    let (state, _dir) = state(MockProvider::new(), None).await;
    let response = router(state)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_enabled_renders_exposition() {
    let render: Arc<dyn Fn() -> String + Send + Sync> =
        Arc::new(|| "# TYPE quill_suggestions_total counter\n".to_string());
    let (state, _dir) = state(MockProvider::new(), Some(render)).await;
    let response = router(state)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("quill_suggestions_total"));
}

#[tokio::test]
async fn frame_reply_is_serialized_outcome() {
    let provider = MockProvider::with_responses(vec![" continues here ".into()]);
    let (state, _dir) = state(provider, None).await;

    let reply: serde_json::Value =
        serde_json::from_str(&reply_for(&state, "The story").await).unwrap();
    assert_eq!(reply["suggestion"], "continues here");
    assert_eq!(reply["usage"]["input_tokens"], 10);
    assert_eq!(reply["usage_summary"]["total_requests"], 1);

    let short: serde_json::Value = serde_json::from_str(&reply_for(&state, "hi").await).unwrap();
    assert_eq!(short, serde_json::json!({"suggestion": ""}));
}

#[tokio::test]
async fn oversized_frame_never_reaches_pipeline() {
    let provider = MockProvider::new();
    let (state, _dir) = state(provider.clone(), None).await;

    let big = "a".repeat(65);
    let reply: serde_json::Value = serde_json::from_str(&reply_for(&state, &big).await).unwrap();
    assert_eq!(reply["suggestion"], "");
    assert!(reply["error"].as_str().unwrap().contains("too large"));
    assert_eq!(provider.call_count().await, 0);
}
