// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `quill usage` command implementation.

use quill_config::QuillConfig;
use quill_core::QuillError;
use quill_cost::{PricingTable, UsageLedger, UsageSummary};

/// Print the ledger summary as pretty JSON.
pub async fn run_usage(config: &QuillConfig) -> Result<(), QuillError> {
    let summary = load_summary(config).await;
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| QuillError::Internal(format!("failed to render usage summary: {e}")))?;
    println!("{json}");
    Ok(())
}

async fn load_summary(config: &QuillConfig) -> UsageSummary {
    let pricing = PricingTable::from_config(&config.cost, &config.llm.default_model);
    let ledger = UsageLedger::open(&config.cost.usage_file, pricing, config.cost.history_limit).await;
    ledger.summary().await
}
