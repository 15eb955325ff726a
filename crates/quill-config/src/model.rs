// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Quill suggestion relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level Quill configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuillConfig {
    /// Listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted language-model settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Spelling correction settings.
    #[serde(default)]
    pub spell: SpellConfig,

    /// Usage ledger, pricing, and admission limits.
    #[serde(default)]
    pub cost: CostConfig,

    /// Prometheus metrics settings.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Listener configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted WebSocket text frame, in bytes.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_frame_bytes: default_max_frame_bytes(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_frame_bytes() -> usize {
    16 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Hosted language-model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Groq API key. `None` falls back to the `GROQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for every suggestion.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Maximum tokens to generate per suggestion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_max_tokens() -> u32 {
    100
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

/// Spelling correction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpellConfig {
    /// Whether input text is spell-corrected before the model call.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Words shorter than this (in characters) are never corrected.
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Leave words starting with an uppercase letter untouched.
    #[serde(default)]
    pub ignore_capitalized: bool,

    /// Largest edit distance considered for a correction.
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,

    /// Frequency dictionary to load instead of the embedded one.
    /// One `word count` pair per line.
    #[serde(default)]
    pub dictionary_path: Option<String>,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_word_length: default_min_word_length(),
            ignore_capitalized: false,
            max_edit_distance: default_max_edit_distance(),
            dictionary_path: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_min_word_length() -> usize {
    3
}

fn default_max_edit_distance() -> usize {
    2
}

/// Per-model token pricing in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelPriceConfig {
    /// Price per million prompt tokens.
    pub input: f64,
    /// Price per million generated tokens.
    pub output: f64,
}

/// Usage ledger, pricing, and admission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Whether calls are gated on rate and budget. The ledger records either way.
    #[serde(default = "default_true")]
    pub track_costs: bool,

    /// Daily spending ceiling in USD.
    #[serde(default = "default_daily_cost_limit")]
    pub daily_cost_limit_usd: f64,

    /// Fraction of a model's requests-per-minute allowance actually used.
    #[serde(default = "default_rate_limit_threshold")]
    pub rate_limit_threshold: f64,

    /// Number of individual call records retained in the ledger history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Path of the JSON usage ledger.
    #[serde(default = "default_usage_file")]
    pub usage_file: String,

    /// Model id to pricing.
    #[serde(default = "default_pricing")]
    pub pricing: BTreeMap<String, ModelPriceConfig>,

    /// Model id to requests per minute.
    #[serde(default = "default_rate_limits")]
    pub rate_limits: BTreeMap<String, u32>,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            track_costs: true,
            daily_cost_limit_usd: default_daily_cost_limit(),
            rate_limit_threshold: default_rate_limit_threshold(),
            history_limit: default_history_limit(),
            usage_file: default_usage_file(),
            pricing: default_pricing(),
            rate_limits: default_rate_limits(),
        }
    }
}

fn default_daily_cost_limit() -> f64 {
    1.0
}

fn default_rate_limit_threshold() -> f64 {
    0.8
}

fn default_history_limit() -> usize {
    1000
}

fn default_usage_file() -> String {
    dirs::data_dir()
        .map(|d| d.join("quill/api_usage.json").display().to_string())
        .unwrap_or_else(|| "api_usage.json".to_string())
}

/// Groq list prices.
fn default_pricing() -> BTreeMap<String, ModelPriceConfig> {
    [
        ("llama3-8b-8192", 0.05, 0.08),
        ("llama3-70b-8192", 0.59, 0.79),
        ("mixtral-8x7b-32768", 0.24, 0.24),
        ("gemma-7b-it", 0.07, 0.07),
    ]
    .into_iter()
    .map(|(model, input, output)| (model.to_string(), ModelPriceConfig { input, output }))
    .collect()
}

fn default_rate_limits() -> BTreeMap<String, u32> {
    [
        "llama3-8b-8192",
        "llama3-70b-8192",
        "mixtral-8x7b-32768",
        "gemma-7b-it",
    ]
    .into_iter()
    .map(|model| (model.to_string(), 30))
    .collect()
}

/// Prometheus metrics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
