// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `quill serve` command implementation.
//!
//! Wires the provider, spell corrector, usage ledger, guard, and pipeline
//! into the gateway and serves until a shutdown signal arrives.

use std::sync::Arc;

use quill_config::QuillConfig;
use quill_core::{CompletionProvider, QuillError};
use quill_cost::{PricingTable, RateAndBudgetGuard, UsageLedger};
use quill_gateway::GatewayState;
use quill_groq::GroqProvider;
use quill_pipeline::{CompletionPipeline, PipelineSettings};
use quill_prometheus::PrometheusAdapter;
use quill_spell::SpellCorrector;
use tracing::{debug, info, warn};

use crate::shutdown;

/// Run the suggestion server until SIGINT or SIGTERM.
pub async fn run_serve(config: QuillConfig) -> Result<(), QuillError> {
    init_tracing(&config.server.log_level);

    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.llm.default_model,
        "starting quill"
    );

    let prometheus_adapter = if config.metrics.enabled {
        match PrometheusAdapter::new() {
            Ok(adapter) => {
                info!("prometheus metrics enabled");
                Some(adapter)
            }
            Err(e) => {
                warn!(error = %e, "prometheus initialization failed, continuing without metrics");
                None
            }
        }
    } else {
        debug!("prometheus metrics disabled by configuration");
        None
    };

    let prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>> =
        prometheus_adapter.as_ref().map(|adapter| {
            let handle = adapter.handle().clone();
            Arc::new(move || handle.render()) as Arc<dyn Fn() -> String + Send + Sync>
        });

    let provider: Arc<dyn CompletionProvider> = Arc::new(GroqProvider::new(&config.llm)?);
    let corrector = Arc::new(SpellCorrector::from_config(&config.spell));

    let pricing = PricingTable::from_config(&config.cost, &config.llm.default_model);
    let ledger = Arc::new(
        UsageLedger::open(&config.cost.usage_file, pricing, config.cost.history_limit).await,
    );
    info!(path = %ledger.path().display(), "usage ledger opened");

    let guard = Arc::new(RateAndBudgetGuard::from_config(
        &config.cost,
        &config.llm,
        Arc::clone(&ledger),
    ));
    if !guard.is_enabled() {
        info!("cost tracking disabled, rate and budget limits off");
    }
    quill_prometheus::set_budget_remaining(guard.daily_remaining().await);

    let pipeline = Arc::new(CompletionPipeline::new(
        provider,
        corrector,
        guard,
        ledger,
        PipelineSettings::from_config(&config.llm),
    ));

    let state = GatewayState::new(pipeline, config.server.max_frame_bytes, prometheus_render);

    let cancel = shutdown::install_signal_handler();
    quill_gateway::start_server(&config.server, state, cancel).await?;

    info!("quill serve shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quill={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
