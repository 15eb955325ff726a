// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers: usage document, health, and metrics.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use quill_core::HealthStatus;
use quill_cost::UsageDocument;
use serde::Serialize;

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the provider reports a problem.
    pub status: String,
    /// Binary version.
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /api/usage
///
/// The full ledger with `api_calls` newest first, for dashboards.
pub async fn get_usage(State(state): State<GatewayState>) -> Json<UsageDocument> {
    Json(state.pipeline.ledger().document().await)
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let status = match state.pipeline.provider().health_check().await {
        Ok(HealthStatus::Healthy) => "ok",
        Ok(HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason)) => {
            tracing::debug!(%reason, "provider not healthy");
            "degraded"
        }
        Err(e) => {
            tracing::debug!(error = %e, "provider health check failed");
            "degraded"
        }
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// GET /metrics
///
/// Prometheus text exposition, 404 when metrics are disabled.
pub async fn get_metrics(State(state): State<GatewayState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
