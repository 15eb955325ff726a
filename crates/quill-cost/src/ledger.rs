// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable usage ledger backed by a single JSON document.
//!
//! Every completion attempt, successful or not, is recorded once with its
//! token counts and cost. Running totals cover every call ever recorded;
//! the per-call history is capped and evicts its oldest entries first.
//!
//! The document is rewritten after every mutation through a temporary file
//! in the same directory followed by a rename, so readers never observe a
//! partially written ledger.

use std::collections::{BTreeMap, VecDeque};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, SecondsFormat};
use quill_core::{QuillError, TokenUsage};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::pricing::PricingTable;

/// One completion attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// RFC 3339 timestamp, server-local offset.
    pub timestamp: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    /// Wall-clock seconds spent in the provider call.
    pub duration: f64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub requests: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost: f64,
}

/// The persisted ledger document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerState {
    pub total_requests: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_cost: f64,
    /// `YYYY-MM-DD` (server-local) to that day's totals.
    pub requests_by_date: BTreeMap<String, DailyAggregate>,
    /// Most recent calls, oldest first.
    pub api_calls: VecDeque<UsageRecord>,
}

impl LedgerState {
    fn apply(&mut self, record: &UsageRecord, date: String, history_limit: usize) {
        let input = u64::from(record.input_tokens);
        let output = u64::from(record.output_tokens);

        self.total_requests += 1;
        self.total_input_tokens += input;
        self.total_output_tokens += output;
        self.total_cost += record.total_cost;

        let day = self.requests_by_date.entry(date).or_default();
        day.requests += 1;
        day.input_tokens += input;
        day.output_tokens += output;
        day.cost += record.total_cost;

        self.api_calls.push_back(record.clone());
        self.truncate_history(history_limit);
    }

    fn truncate_history(&mut self, history_limit: usize) {
        while self.api_calls.len() > history_limit {
            self.api_calls.pop_front();
        }
    }
}

/// Aggregate view returned alongside each suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageSummary {
    pub total_requests: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_cost: f64,
    pub today: DailyAggregate,
}

/// The ledger as served to dashboards: `api_calls` newest first.
#[derive(Debug, Clone, Serialize)]
pub struct UsageDocument {
    pub total_requests: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_cost: f64,
    pub requests_by_date: BTreeMap<String, DailyAggregate>,
    pub api_calls: Vec<UsageRecord>,
}

/// Process-wide usage ledger.
///
/// The single writer of the persisted document. All mutations run their
/// read-modify-write-persist sequence under one async mutex.
pub struct UsageLedger {
    path: PathBuf,
    pricing: PricingTable,
    history_limit: usize,
    state: Mutex<LedgerState>,
}

impl UsageLedger {
    /// Open the ledger at `path`, loading any prior state.
    ///
    /// A missing, unreadable, or malformed file yields a fresh ledger; this
    /// never fails.
    pub async fn open(path: impl Into<PathBuf>, pricing: PricingTable, history_limit: usize) -> Self {
        let path = path.into();
        let history_limit = history_limit.max(1);
        let mut state = load_state(&path).await;
        state.truncate_history(history_limit);

        Self {
            path,
            pricing,
            history_limit,
            state: Mutex::new(state),
        }
    }

    /// Path of the backing JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one completion attempt and persist the ledger.
    ///
    /// `error` marks the attempt as failed. Persistence failures are logged
    /// and do not affect the returned record or the in-memory totals.
    pub async fn record(
        &self,
        model: &str,
        usage: TokenUsage,
        duration: Duration,
        error: Option<String>,
    ) -> UsageRecord {
        let cost = self.pricing.cost(model, &usage);
        // Stamp under the lock so history order matches timestamp order.
        let mut state = self.state.lock().await;
        let now = Local::now();
        let record = UsageRecord {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, false),
            model: model.to_string(),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            input_cost: cost.input_cost,
            output_cost: cost.output_cost,
            total_cost: cost.total_cost,
            duration: duration.as_secs_f64(),
            success: error.is_none(),
            error,
        };

        state.apply(&record, date_key(now), self.history_limit);

        info!(
            model = %record.model,
            input_tokens = record.input_tokens,
            output_tokens = record.output_tokens,
            cost_usd = record.total_cost,
            success = record.success,
            "usage recorded"
        );

        if let Err(e) = self.persist(&state).await {
            warn!(path = %self.path.display(), error = %e, "failed to save usage ledger");
        }

        record
    }

    /// Running totals plus today's aggregate.
    pub async fn summary(&self) -> UsageSummary {
        let state = self.state.lock().await;
        UsageSummary {
            total_requests: state.total_requests,
            total_input_tokens: state.total_input_tokens,
            total_output_tokens: state.total_output_tokens,
            total_cost: state.total_cost,
            today: state
                .requests_by_date
                .get(&date_key(Local::now()))
                .copied()
                .unwrap_or_default(),
        }
    }

    /// Today's aggregate (zero if nothing was recorded today).
    pub async fn today(&self) -> DailyAggregate {
        self.summary().await.today
    }

    /// Retained call records, newest first.
    pub async fn all_records(&self) -> Vec<UsageRecord> {
        let state = self.state.lock().await;
        state.api_calls.iter().rev().cloned().collect()
    }

    /// Full ledger document with `api_calls` newest first.
    pub async fn document(&self) -> UsageDocument {
        let state = self.state.lock().await;
        UsageDocument {
            total_requests: state.total_requests,
            total_input_tokens: state.total_input_tokens,
            total_output_tokens: state.total_output_tokens,
            total_cost: state.total_cost,
            requests_by_date: state.requests_by_date.clone(),
            api_calls: state.api_calls.iter().rev().cloned().collect(),
        }
    }

    /// Serialize `state` and atomically replace the backing file.
    async fn persist(&self, state: &LedgerState) -> Result<(), QuillError> {
        let json = serde_json::to_vec_pretty(state).map_err(storage_err)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &json))
            .await
            .map_err(|e| QuillError::Internal(format!("ledger writer panicked: {e}")))?
    }
}

/// Calendar-day key in server-local time.
fn date_key(now: chrono::DateTime<Local>) -> String {
    now.format("%Y-%m-%d").to_string()
}

fn storage_err(e: impl std::error::Error + Send + Sync + 'static) -> QuillError {
    QuillError::Storage {
        source: Box::new(e),
    }
}

async fn load_state(path: &Path) -> LedgerState {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no usage ledger yet, starting fresh");
            return LedgerState::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read usage ledger, starting fresh");
            return LedgerState::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(state) => state,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed usage ledger, starting fresh");
            LedgerState::default()
        }
    }
}

/// Write `bytes` to a temp file beside `path`, then rename over it.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), QuillError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(storage_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(storage_err)?;
    tmp.write_all(bytes).map_err(storage_err)?;
    tmp.as_file().sync_all().map_err(storage_err)?;
    tmp.persist(path).map_err(|e| storage_err(e.error))?;
    Ok(())
}
