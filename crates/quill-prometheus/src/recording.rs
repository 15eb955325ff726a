// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics. Without an installed recorder every helper
//! is a no-op.

use metrics::{describe_counter, describe_gauge, describe_histogram};

/// How a suggestion request ended, used as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input too short to bother the model.
    Skipped,
    Suggested,
    CostLimited,
    RateLimited,
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Suggested => "suggested",
            Self::CostLimited => "cost_limited",
            Self::RateLimited => "rate_limited",
            Self::Failed => "failed",
        }
    }
}

/// Register all Quill metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "quill_suggestions_total",
        "Suggestion requests by outcome"
    );
    describe_counter!("quill_tokens_total", "Total tokens consumed");
    describe_counter!("quill_cost_usd_total", "Total spend in USD");
    describe_gauge!(
        "quill_budget_remaining_usd",
        "Remaining daily budget in USD"
    );
    describe_gauge!(
        "quill_active_connections",
        "Currently open WebSocket connections"
    );
    describe_histogram!(
        "quill_completion_latency_seconds",
        "Provider completion latency in seconds"
    );
}

/// Record the outcome of one suggestion request.
pub fn record_suggestion(outcome: Outcome) {
    metrics::counter!("quill_suggestions_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record token consumption.
pub fn record_tokens(model: &str, input: u32, output: u32) {
    metrics::counter!("quill_tokens_total", "model" => model.to_string(), "type" => "input")
        .increment(u64::from(input));
    metrics::counter!("quill_tokens_total", "model" => model.to_string(), "type" => "output")
        .increment(u64::from(output));
}

/// Add to the running spend.
pub fn record_cost(usd: f64) {
    // Counters are integral; the spend total is kept as an ever-increasing gauge.
    metrics::gauge!("quill_cost_usd_total").increment(usd);
}

/// Set the remaining budget in USD.
pub fn set_budget_remaining(usd: f64) {
    metrics::gauge!("quill_budget_remaining_usd").set(usd);
}

/// Set the number of open WebSocket connections.
pub fn set_active_connections(count: usize) {
    metrics::gauge!("quill_active_connections").set(count as f64);
}

/// Record provider latency.
pub fn record_latency(seconds: f64) {
    metrics::histogram!("quill_completion_latency_seconds").record(seconds);
}
