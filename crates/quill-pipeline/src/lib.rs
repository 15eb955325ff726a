// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The usage-governed completion pipeline.
//!
//! Turns raw keystroked text into a spelling-corrected, rate- and
//! budget-checked completion request, records every attempt in the usage
//! ledger, and assembles the response sent back to the client.

pub mod outcome;
pub mod pipeline;
pub mod prompt;

pub use outcome::{CallUsage, SpellingCorrection, SuggestOutcome};
pub use pipeline::{CompletionPipeline, PipelineSettings};
pub use prompt::{MIN_INPUT_CHARS, SYSTEM_PROMPT, user_prompt};
