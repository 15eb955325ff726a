// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the provider, cost, and pipeline crates.

use serde::{Deserialize, Serialize};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Token counts for a single completion call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens (system + user).
    pub input_tokens: u32,
    /// Generated tokens.
    pub output_tokens: u32,
}

/// A single-turn completion request: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier (e.g., "llama3-8b-8192").
    pub model: String,
    /// System role instructions.
    pub system_prompt: String,
    /// User role content.
    pub user_prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// The prompt as the provider sees it, used for token estimation.
    pub fn rendered_prompt(&self) -> String {
        format!("{}\n{}", self.system_prompt, self.user_prompt)
    }
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Generated text, untrimmed.
    pub text: String,
    /// Token counts, reported by the provider or estimated.
    pub usage: TokenUsage,
    /// Model that served the request.
    pub model: String,
}
