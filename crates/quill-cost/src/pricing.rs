// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model pricing and rate-limit tables.
//!
//! Both tables fall back to the default model's entry for unknown models so
//! that every call is priced and limited, even for models added at runtime
//! by the provider.

use std::collections::BTreeMap;

use quill_config::model::CostConfig;
use quill_core::TokenUsage;
use serde::Serialize;

/// Requests per minute assumed when neither the model nor the default model is listed.
pub const FALLBACK_REQUESTS_PER_MINUTE: u32 = 30;

/// Per-model pricing in USD per million tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelPricing {
    /// Cost per million input tokens.
    pub input_per_mtok: f64,
    /// Cost per million output tokens.
    pub output_per_mtok: f64,
}

/// Cost of one call, split by direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

/// Calculate cost in USD for a given token usage and pricing.
///
/// Formula: (tokens / 1_000_000) * price_per_million, per direction.
pub fn calculate_cost(usage: &TokenUsage, pricing: &ModelPricing) -> CostBreakdown {
    let input_cost = (f64::from(usage.input_tokens) / 1_000_000.0) * pricing.input_per_mtok;
    let output_cost = (f64::from(usage.output_tokens) / 1_000_000.0) * pricing.output_per_mtok;
    CostBreakdown {
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
    }
}

/// Model id to pricing, with fallback to the default model.
#[derive(Debug, Clone)]
pub struct PricingTable {
    models: BTreeMap<String, ModelPricing>,
    default_model: String,
}

impl PricingTable {
    pub fn new(models: BTreeMap<String, ModelPricing>, default_model: impl Into<String>) -> Self {
        Self {
            models,
            default_model: default_model.into(),
        }
    }

    /// Build the table from the `[cost.pricing]` section.
    pub fn from_config(config: &CostConfig, default_model: &str) -> Self {
        let models = config
            .pricing
            .iter()
            .map(|(model, price)| {
                (
                    model.clone(),
                    ModelPricing {
                        input_per_mtok: price.input,
                        output_per_mtok: price.output,
                    },
                )
            })
            .collect();
        Self::new(models, default_model)
    }

    /// Pricing for `model`, else the default model's, else free.
    pub fn get(&self, model: &str) -> ModelPricing {
        self.models
            .get(model)
            .or_else(|| self.models.get(&self.default_model))
            .copied()
            .unwrap_or_default()
    }

    /// Cost of `usage` on `model`.
    pub fn cost(&self, model: &str, usage: &TokenUsage) -> CostBreakdown {
        calculate_cost(usage, &self.get(model))
    }
}

/// Model id to requests per minute, with fallback to the default model.
#[derive(Debug, Clone)]
pub struct RateLimitTable {
    limits: BTreeMap<String, u32>,
    default_model: String,
}

impl RateLimitTable {
    pub fn new(limits: BTreeMap<String, u32>, default_model: impl Into<String>) -> Self {
        Self {
            limits,
            default_model: default_model.into(),
        }
    }

    /// Build the table from the `[cost.rate_limits]` section.
    pub fn from_config(config: &CostConfig, default_model: &str) -> Self {
        Self::new(config.rate_limits.clone(), default_model)
    }

    /// Requests per minute allowed for `model`.
    pub fn get(&self, model: &str) -> u32 {
        self.limits
            .get(model)
            .or_else(|| self.limits.get(&self.default_model))
            .copied()
            .unwrap_or(FALLBACK_REQUESTS_PER_MINUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groq_pricing() -> PricingTable {
        PricingTable::from_config(&CostConfig::default(), "llama3-8b-8192")
    }

    #[test]
    fn listed_model_pricing() {
        let p = groq_pricing().get("llama3-70b-8192");
        assert!((p.input_per_mtok - 0.59).abs() < f64::EPSILON);
        assert!((p.output_per_mtok - 0.79).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_model_falls_back_to_default() {
        let p = groq_pricing().get("unknown-model-xyz");
        assert!((p.input_per_mtok - 0.05).abs() < f64::EPSILON);
        assert!((p.output_per_mtok - 0.08).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_default_prices_at_zero() {
        let table = PricingTable::new(BTreeMap::new(), "nothing");
        assert_eq!(table.get("anything"), ModelPricing::default());
    }

    #[test]
    fn calculate_cost_splits_directions() {
        let pricing = ModelPricing {
            input_per_mtok: 0.59,
            output_per_mtok: 0.79,
        };
        let usage = TokenUsage {
            input_tokens: 1000,
            output_tokens: 500,
        };
        let cost = calculate_cost(&usage, &pricing);
        // input: 1000/1M * 0.59 = 0.00059
        // output: 500/1M * 0.79 = 0.000395
        assert!((cost.input_cost - 0.00059).abs() < 1e-12);
        assert!((cost.output_cost - 0.000395).abs() < 1e-12);
        assert!((cost.total_cost - 0.000985).abs() < 1e-12);
    }

    #[test]
    fn zero_tokens_zero_cost() {
        let cost = groq_pricing().cost("llama3-8b-8192", &TokenUsage::default());
        assert_eq!(cost, CostBreakdown::default());
    }

    #[test]
    fn rate_limit_lookup_and_fallback() {
        let mut limits = BTreeMap::new();
        limits.insert("fast".to_string(), 120);
        limits.insert("default".to_string(), 10);
        let table = RateLimitTable::new(limits, "default");
        assert_eq!(table.get("fast"), 120);
        assert_eq!(table.get("unlisted"), 10);

        let empty = RateLimitTable::new(BTreeMap::new(), "default");
        assert_eq!(empty.get("unlisted"), FALLBACK_REQUESTS_PER_MINUTE);
    }
}
