// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Installing the global Prometheus recorder.

use quill_prometheus::{Outcome, PrometheusAdapter, record_suggestion};

#[test]
fn installed_recorder_renders_recorded_metrics_and_is_exclusive() {
    let adapter = PrometheusAdapter::new().unwrap();

    record_suggestion(Outcome::Suggested);
    let rendered = adapter.render();
    assert!(rendered.contains("quill_suggestions_total"));
    assert!(rendered.contains(r#"outcome="suggested""#));
    assert_eq!(rendered, adapter.handle().render());

    // Only one global recorder per process.
    assert!(PrometheusAdapter::new().is_err());
}
