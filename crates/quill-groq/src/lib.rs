// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq provider adapter for the Quill suggestion relay.
//!
//! This crate implements [`CompletionProvider`] for Groq's OpenAI-compatible
//! chat completions API.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use quill_config::model::LlmConfig;
use quill_core::error::QuillError;
use quill_core::traits::{CompletionProvider, PluginAdapter};
use quill_core::types::{Completion, CompletionRequest, HealthStatus, TokenUsage};
use quill_core::estimate_tokens;
use tracing::{info, warn};

use crate::client::GroqClient;
use crate::types::{ChatMessage, ChatRequest};

/// Environment variable consulted when `llm.api_key` is unset.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Groq provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `GROQ_API_KEY` env var. Without a
/// key the provider still constructs, reports itself unhealthy, and fails
/// every completion, so the relay keeps serving and accounting requests.
pub struct GroqProvider {
    client: Option<GroqClient>,
}

impl GroqProvider {
    /// Creates a new Groq provider from the `[llm]` configuration.
    pub fn new(config: &LlmConfig) -> Result<Self, QuillError> {
        let Some(api_key) = resolve_api_key(config.api_key.as_deref()) else {
            warn!("no Groq API key configured; completions will fail");
            return Ok(Self { client: None });
        };

        let client = GroqClient::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(
            model = config.default_model,
            endpoint = client.endpoint(),
            "Groq provider initialized"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    fn client(&self) -> Result<&GroqClient, QuillError> {
        self.client.as_ref().ok_or_else(|| {
            QuillError::Config(format!(
                "Groq API key not found. Set llm.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
    }
}

#[async_trait]
impl PluginAdapter for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn health_check(&self) -> Result<HealthStatus, QuillError> {
        // Avoids spending tokens: only checks that a key is configured.
        Ok(match self.client {
            Some(_) => HealthStatus::Healthy,
            None => HealthStatus::Unhealthy("no API key configured".into()),
        })
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, QuillError> {
        let client = self.client()?;

        let chat_request = ChatRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage::system(request.system_prompt.clone()),
                ChatMessage::user(request.user_prompt.clone()),
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };

        let response = client.chat(&chat_request).await?;
        let text = response.text().to_string();

        let usage = match response.usage {
            Some(u) => TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            },
            None => TokenUsage {
                input_tokens: estimate_tokens(&request.rendered_prompt()),
                output_tokens: estimate_tokens(&text),
            },
        };

        let model = if response.model.is_empty() {
            request.model
        } else {
            response.model
        };

        Ok(Completion { text, usage, model })
    }
}

/// Resolve the API key from config, then the environment.
fn resolve_api_key(config_key: Option<&str>) -> Option<String> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Some(key.to_string());
    }

    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}
