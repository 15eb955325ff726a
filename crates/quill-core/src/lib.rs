// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Quill suggestion relay.
//!
//! This crate provides the error type, the completion request/response
//! types, and the provider trait shared by every other crate in the
//! workspace. Provider adapters implement [`CompletionProvider`].

pub mod error;
pub mod tokens;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::QuillError;
pub use tokens::estimate_tokens;
pub use traits::{CompletionProvider, PluginAdapter};
pub use types::{Completion, CompletionRequest, HealthStatus, TokenUsage};
