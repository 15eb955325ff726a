// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage accounting and admission control for the Quill suggestion relay.
//!
//! This crate provides:
//! - **Usage ledger**: Durable JSON record of every completion attempt with running totals
//! - **Guard**: Sliding-window rate limiting and a daily spending ceiling with 80% warnings
//! - **Pricing**: Per-model price and rate-limit tables with default-model fallback

pub mod guard;
pub mod ledger;
pub mod pricing;

pub use guard::RateAndBudgetGuard;
pub use ledger::{DailyAggregate, LedgerState, UsageDocument, UsageLedger, UsageRecord, UsageSummary};
pub use pricing::{CostBreakdown, ModelPricing, PricingTable, RateLimitTable};
