// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-request suggestion flow.

use std::sync::Arc;

use quill_config::model::LlmConfig;
use quill_core::{CompletionProvider, CompletionRequest, TokenUsage};
use quill_cost::{RateAndBudgetGuard, UsageLedger};
use quill_prometheus::{
    Outcome, record_cost, record_latency, record_suggestion, record_tokens, set_budget_remaining,
};
use quill_spell::SpellCorrector;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::outcome::{CallUsage, SpellingCorrection, SuggestOutcome};
use crate::prompt::{MIN_INPUT_CHARS, SYSTEM_PROMPT, user_prompt};

/// Characters of a suggestion echoed to the log.
const LOG_PREVIEW_CHARS: usize = 30;

/// Model parameters applied to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl PipelineSettings {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.default_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Spelling pass, admission checks, model call and usage accounting for
/// one piece of text.
///
/// Every path yields a well-formed [`SuggestOutcome`]; nothing here
/// returns an error to the caller.
pub struct CompletionPipeline {
    provider: Arc<dyn CompletionProvider>,
    corrector: Arc<SpellCorrector>,
    guard: Arc<RateAndBudgetGuard>,
    ledger: Arc<UsageLedger>,
    settings: PipelineSettings,
}

impl CompletionPipeline {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        corrector: Arc<SpellCorrector>,
        guard: Arc<RateAndBudgetGuard>,
        ledger: Arc<UsageLedger>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            provider,
            corrector,
            guard,
            ledger,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn ledger(&self) -> &Arc<UsageLedger> {
        &self.ledger
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    /// Produce a suggestion for `raw_text`.
    pub async fn suggest(&self, raw_text: &str) -> SuggestOutcome {
        if raw_text.trim().chars().count() < MIN_INPUT_CHARS {
            debug!("input too short, skipping");
            record_suggestion(Outcome::Skipped);
            return SuggestOutcome::Empty;
        }

        let corrected = self.corrector.correct(raw_text);
        let spelling_correction = if corrected != raw_text {
            info!(original = raw_text, corrected = %corrected, "spelling corrected");
            Some(SpellingCorrection {
                original: raw_text.to_string(),
                corrected: corrected.clone(),
            })
        } else {
            None
        };

        let model = self.settings.model.as_str();

        if !self.guard.under_daily_budget().await {
            let limit = self.guard.daily_limit_usd();
            warn!(daily_limit = limit, "daily cost limit reached, refusing request");
            record_suggestion(Outcome::CostLimited);
            return SuggestOutcome::CostLimitExceeded {
                error: format!(
                    "Daily cost limit of ${limit:.2} reached. Try again tomorrow or raise the limit."
                ),
            };
        }

        if !self.guard.try_admit(model).await {
            warn!(model, "rate limit reached, refusing request");
            record_suggestion(Outcome::RateLimited);
            return SuggestOutcome::RateLimited {
                error: "Rate limit reached. Please wait a moment before requesting more suggestions."
                    .to_string(),
            };
        }

        let request = CompletionRequest {
            model: model.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: user_prompt(&corrected),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let started = Instant::now();
        let result = self.provider.complete(request).await;
        let elapsed = started.elapsed();
        record_latency(elapsed.as_secs_f64());

        match result {
            Ok(completion) => {
                let suggestion = completion.text.trim().to_string();
                let record = self
                    .ledger
                    .record(model, completion.usage, elapsed, None)
                    .await;
                let usage_summary = self.ledger.summary().await;

                record_tokens(model, record.input_tokens, record.output_tokens);
                record_cost(record.total_cost);
                set_budget_remaining(self.guard.daily_remaining().await);
                record_suggestion(Outcome::Suggested);
                info!(suggestion = %preview(&suggestion), "generated suggestion");

                SuggestOutcome::Suggested {
                    suggestion,
                    spelling_correction,
                    usage: CallUsage {
                        input_tokens: record.input_tokens,
                        output_tokens: record.output_tokens,
                        cost: record.total_cost,
                        duration: record.duration,
                    },
                    usage_summary,
                }
            }
            Err(e) => {
                let message = e.to_string();
                error!(model, error = %message, "error generating suggestion");
                // `record` never fails; persistence problems are logged inside it.
                self.ledger
                    .record(
                        model,
                        TokenUsage::default(),
                        std::time::Duration::ZERO,
                        Some(message.clone()),
                    )
                    .await;
                record_suggestion(Outcome::Failed);
                SuggestOutcome::Failed { error: message }
            }
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > LOG_PREVIEW_CHARS {
        let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
