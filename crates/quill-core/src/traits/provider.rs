// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for hosted language-model completion APIs.

use async_trait::async_trait;

use crate::error::QuillError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Completion, CompletionRequest};

/// Adapter for a hosted completion API.
///
/// Implementations return token counts in [`Completion::usage`], falling
/// back to [`crate::estimate_tokens`] when the API does not report them.
/// Transport, auth, and quota failures are returned as
/// [`QuillError::Provider`] or [`QuillError::Timeout`].
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, QuillError>;
}
