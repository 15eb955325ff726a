// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent use of the usage ledger.

use std::sync::Arc;
use std::time::Duration;

use quill_config::model::CostConfig;
use quill_core::TokenUsage;
use quill_cost::{LedgerState, PricingTable, UsageLedger};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_records_are_all_counted_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_usage.json");
    let pricing = PricingTable::from_config(&CostConfig::default(), "llama3-8b-8192");
    let ledger = Arc::new(UsageLedger::open(&path, pricing, 1000).await);

    let mut handles = Vec::new();
    for i in 0..50u32 {
        let ledger = Arc::clone(&ledger);
        handles.push(tokio::spawn(async move {
            let usage = TokenUsage {
                input_tokens: 100 + i,
                output_tokens: 20,
            };
            ledger
                .record("llama3-8b-8192", usage, Duration::from_millis(5), None)
                .await
                .total_cost
        }));
    }

    let mut expected_cost = 0.0;
    for handle in handles {
        expected_cost += handle.await.unwrap();
    }

    let summary = ledger.summary().await;
    assert_eq!(summary.total_requests, 50);
    assert_eq!(summary.total_output_tokens, 50 * 20);
    assert!((summary.total_cost - expected_cost).abs() < 1e-12);

    // The file on disk reflects the final state.
    let on_disk: LedgerState =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk.total_requests, 50);
    assert_eq!(on_disk.api_calls.len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_history_is_newest_first_by_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let pricing = PricingTable::from_config(&CostConfig::default(), "llama3-8b-8192");
    let ledger = Arc::new(UsageLedger::open(dir.path().join("api_usage.json"), pricing, 1000).await);

    let mut handles = Vec::new();
    for _ in 0..40 {
        let ledger = Arc::clone(&ledger);
        handles.push(tokio::spawn(async move {
            ledger
                .record("llama3-8b-8192", TokenUsage::default(), Duration::ZERO, None)
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stamps: Vec<_> = ledger
        .all_records()
        .await
        .iter()
        .map(|r| chrono::DateTime::parse_from_rfc3339(&r.timestamp).unwrap())
        .collect();
    assert_eq!(stamps.len(), 40);
    assert!(stamps.windows(2).all(|pair| pair[0] >= pair[1]));
}
