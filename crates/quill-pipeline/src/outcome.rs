// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline outcomes and their wire representation.
//!
//! Every outcome serializes to one flat JSON object whose `suggestion` key is
//! always present; optional keys are omitted rather than sent as `null`.

use quill_cost::UsageSummary;
use serde::{Serialize, Serializer};

/// Ephemeral record of a spelling change, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellingCorrection {
    pub original: String,
    pub corrected: String,
}

/// Per-call usage returned with a successful suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CallUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    /// USD.
    pub cost: f64,
    /// Seconds.
    pub duration: f64,
}

/// Result of one suggestion request.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestOutcome {
    /// Input too short; nothing was checked, called, or recorded.
    Empty,
    Suggested {
        suggestion: String,
        spelling_correction: Option<SpellingCorrection>,
        usage: CallUsage,
        usage_summary: UsageSummary,
    },
    /// Today's spend reached the daily ceiling; no call was made.
    CostLimitExceeded { error: String },
    /// The sliding rate window is full; no call was made.
    RateLimited { error: String },
    /// The provider call failed; one failed attempt was recorded.
    Failed { error: String },
}

impl SuggestOutcome {
    /// The suggestion text, empty for every non-success outcome.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::Suggested { suggestion, .. } => suggestion,
            _ => "",
        }
    }

    /// The error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::CostLimitExceeded { error }
            | Self::RateLimited { error }
            | Self::Failed { error } => Some(error),
            Self::Empty | Self::Suggested { .. } => None,
        }
    }
}

/// Flat wire shape.
#[derive(Serialize)]
struct SuggestResponse<'a> {
    suggestion: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    spelling_correction: Option<&'a SpellingCorrection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<&'a CallUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage_summary: Option<&'a UsageSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    cost_limit_exceeded: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    rate_limited: bool,
}

impl<'a> From<&'a SuggestOutcome> for SuggestResponse<'a> {
    fn from(outcome: &'a SuggestOutcome) -> Self {
        let mut response = SuggestResponse {
            suggestion: outcome.suggestion(),
            spelling_correction: None,
            usage: None,
            usage_summary: None,
            error: outcome.error(),
            cost_limit_exceeded: false,
            rate_limited: false,
        };
        match outcome {
            SuggestOutcome::Suggested {
                spelling_correction,
                usage,
                usage_summary,
                ..
            } => {
                response.spelling_correction = spelling_correction.as_ref();
                response.usage = Some(usage);
                response.usage_summary = Some(usage_summary);
            }
            SuggestOutcome::CostLimitExceeded { .. } => response.cost_limit_exceeded = true,
            SuggestOutcome::RateLimited { .. } => response.rate_limited = true,
            SuggestOutcome::Empty | SuggestOutcome::Failed { .. } => {}
        }
        response
    }
}

impl Serialize for SuggestOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SuggestResponse::from(self).serialize(serializer)
    }
}
