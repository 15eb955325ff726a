// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway state backed by a mock provider and a temporary ledger.

use std::collections::BTreeMap;
use std::sync::Arc;

use quill_cost::{ModelPricing, PricingTable, RateAndBudgetGuard, RateLimitTable, UsageLedger};
use quill_gateway::GatewayState;
use quill_pipeline::{CompletionPipeline, PipelineSettings};
use quill_spell::SpellCorrector;
use quill_test_utils::MockProvider;
use tempfile::TempDir;

const MODEL: &str = "llama3-8b-8192";

/// Gateway state with a 64-byte frame limit.
pub async fn state(
    provider: MockProvider,
    prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>>,
) -> (GatewayState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pricing = PricingTable::new(
        BTreeMap::from([(
            MODEL.to_string(),
            ModelPricing {
                input_per_mtok: 0.05,
                output_per_mtok: 0.08,
            },
        )]),
        MODEL,
    );
    let ledger = Arc::new(UsageLedger::open(dir.path().join("api_usage.json"), pricing, 1000).await);
    let guard = Arc::new(RateAndBudgetGuard::new(
        true,
        0.8,
        1.0,
        RateLimitTable::new(BTreeMap::from([(MODEL.to_string(), 30)]), MODEL),
        Arc::clone(&ledger),
    ));
    let pipeline = Arc::new(CompletionPipeline::new(
        Arc::new(provider),
        Arc::new(SpellCorrector::passthrough()),
        guard,
        ledger,
        PipelineSettings {
            model: MODEL.to_string(),
            max_tokens: 100,
            temperature: 0.7,
        },
    ));
    (GatewayState::new(pipeline, 64, prometheus_render), dir)
}
