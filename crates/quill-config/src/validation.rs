// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as value ranges and cross-section consistency.

use crate::diagnostic::ConfigError;
use crate::model::QuillConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &QuillConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.server.host.trim().is_empty() {
        fail("server.host must not be empty".to_string());
    }

    if config.server.max_frame_bytes == 0 {
        fail("server.max_frame_bytes must be at least 1".to_string());
    }

    let temperature = config.llm.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        fail(format!(
            "llm.temperature must be between 0.0 and 2.0, got {temperature}"
        ));
    }

    if config.llm.max_tokens == 0 {
        fail("llm.max_tokens must be at least 1".to_string());
    }

    if config.llm.default_model.trim().is_empty() {
        fail("llm.default_model must not be empty".to_string());
    }

    if config.spell.min_word_length < 1 {
        fail("spell.min_word_length must be at least 1".to_string());
    }

    let cost = &config.cost;
    if cost.daily_cost_limit_usd < 0.0 {
        fail(format!(
            "cost.daily_cost_limit_usd must be non-negative, got {}",
            cost.daily_cost_limit_usd
        ));
    }

    let threshold = cost.rate_limit_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        fail(format!(
            "cost.rate_limit_threshold must be in (0, 1], got {threshold}"
        ));
    }

    if cost.history_limit < 1 {
        fail("cost.history_limit must be at least 1".to_string());
    }

    if cost.usage_file.trim().is_empty() {
        fail("cost.usage_file must not be empty".to_string());
    }

    for (model, price) in &cost.pricing {
        if price.input < 0.0 || price.output < 0.0 {
            fail(format!("cost.pricing.{model} prices must be non-negative"));
        }
    }

    if cost.track_costs {
        let model = &config.llm.default_model;
        if !cost.pricing.contains_key(model) {
            fail(format!(
                "llm.default_model `{model}` has no entry in cost.pricing"
            ));
        }
        if !cost.rate_limits.contains_key(model) {
            fail(format!(
                "llm.default_model `{model}` has no entry in cost.rate_limits"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
