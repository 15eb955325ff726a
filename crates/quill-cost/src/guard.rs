// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission control consulted before every completion call.
//!
//! Two independent checks:
//! - **Rate**: a 60-second sliding window of admitted requests, compared
//!   against the model's requests-per-minute scaled by a safety threshold.
//! - **Budget**: today's ledger cost compared against the daily ceiling,
//!   with a `tracing::warn` once spend passes 80% of it.
//!
//! The window lives in memory only and resets on restart.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use quill_config::model::{CostConfig, LlmConfig};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::ledger::UsageLedger;
use crate::pricing::RateLimitTable;

/// Length of the sliding rate window.
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Fraction of the daily ceiling at which a warning is logged.
const BUDGET_WARN_FRACTION: f64 = 0.8;

/// Rate and budget admission policy.
pub struct RateAndBudgetGuard {
    enabled: bool,
    threshold: f64,
    daily_limit_usd: f64,
    rate_limits: RateLimitTable,
    window: Mutex<VecDeque<Instant>>,
    ledger: Arc<UsageLedger>,
}

impl RateAndBudgetGuard {
    pub fn new(
        enabled: bool,
        threshold: f64,
        daily_limit_usd: f64,
        rate_limits: RateLimitTable,
        ledger: Arc<UsageLedger>,
    ) -> Self {
        Self {
            enabled,
            threshold,
            daily_limit_usd,
            rate_limits,
            window: Mutex::new(VecDeque::new()),
            ledger,
        }
    }

    /// Build the guard from the `[cost]` and `[llm]` sections.
    pub fn from_config(cost: &CostConfig, llm: &LlmConfig, ledger: Arc<UsageLedger>) -> Self {
        Self::new(
            cost.track_costs,
            cost.rate_limit_threshold,
            cost.daily_cost_limit_usd,
            RateLimitTable::from_config(cost, &llm.default_model),
            ledger,
        )
    }

    /// Whether limits are enforced at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether another request to `model` fits in the current window.
    pub async fn can_proceed(&self, model: &str) -> bool {
        if !self.enabled {
            return true;
        }
        let mut window = self.window.lock().await;
        prune(&mut window, Instant::now());
        self.fits(&window, model)
    }

    /// Note an admitted request at the current instant.
    pub async fn record_attempt(&self) {
        if !self.enabled {
            return;
        }
        let now = Instant::now();
        let mut window = self.window.lock().await;
        prune(&mut window, now);
        window.push_back(now);
    }

    /// Check and record in one step, so concurrent callers cannot both
    /// take the last slot.
    pub async fn try_admit(&self, model: &str) -> bool {
        if !self.enabled {
            return true;
        }
        let now = Instant::now();
        let mut window = self.window.lock().await;
        prune(&mut window, now);
        if !self.fits(&window, model) {
            return false;
        }
        window.push_back(now);
        true
    }

    /// Whether today's spend is strictly below the daily ceiling.
    pub async fn under_daily_budget(&self) -> bool {
        if !self.enabled {
            return true;
        }
        let spent = self.ledger.today().await.cost;
        if spent >= self.daily_limit_usd {
            return false;
        }
        if spent >= self.daily_limit_usd * BUDGET_WARN_FRACTION {
            warn!(
                daily_total = spent,
                daily_limit = self.daily_limit_usd,
                "approaching daily cost limit (80%+)"
            );
        }
        true
    }

    /// Remaining spend for today, never negative.
    pub async fn daily_remaining(&self) -> f64 {
        let spent = self.ledger.today().await.cost;
        (self.daily_limit_usd - spent).max(0.0)
    }

    /// Configured daily ceiling in USD.
    pub fn daily_limit_usd(&self) -> f64 {
        self.daily_limit_usd
    }

    /// Number of requests in the window right now.
    pub async fn window_len(&self) -> usize {
        let mut window = self.window.lock().await;
        prune(&mut window, Instant::now());
        window.len()
    }

    fn fits(&self, window: &VecDeque<Instant>, model: &str) -> bool {
        let allowed = f64::from(self.rate_limits.get(model)) * self.threshold;
        let fits = (window.len() as f64) < allowed;
        if !fits {
            debug!(model, in_window = window.len(), allowed, "rate window full");
        }
        fits
    }
}

/// Drop instants at least one window old.
fn prune(window: &mut VecDeque<Instant>, now: Instant) {
    while let Some(&oldest) = window.front() {
        if now.duration_since(oldest) >= RATE_WINDOW {
            window.pop_front();
        } else {
            break;
        }
    }
}
