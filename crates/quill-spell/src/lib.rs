// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spelling correction for incoming suggestion text.
//!
//! A [`Dictionary`] maps known words to corpus frequencies; the
//! [`SpellCorrector`] walks the letter runs of a text and replaces unknown
//! words with their closest, most frequent dictionary neighbour.

pub mod corrector;
pub mod dictionary;

pub use corrector::{ALLOW_LIST, SpellCorrector, SpellOptions};
pub use dictionary::{Dictionary, DictionaryError};
