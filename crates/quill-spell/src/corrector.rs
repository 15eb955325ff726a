// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Word-level spelling correction that preserves the surrounding text.

use std::path::Path;
use std::sync::LazyLock;

use quill_config::model::SpellConfig;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::dictionary::Dictionary;

/// Terms that are never corrected, compared case-insensitively.
pub const ALLOW_LIST: &[&str] = &["api", "json", "html", "css", "js", "url", "http", "https"];

/// Maximal runs of letters. Digits and punctuation are separators.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").unwrap());

/// Static correction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellOptions {
    /// When false, text passes through untouched.
    pub enabled: bool,
    /// Tokens with fewer characters are left alone.
    pub min_word_length: usize,
    /// Leave tokens that start with an uppercase letter alone.
    pub ignore_capitalized: bool,
    /// Largest edit distance considered for a replacement.
    pub max_edit_distance: usize,
}

impl Default for SpellOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            min_word_length: 3,
            ignore_capitalized: false,
            max_edit_distance: 2,
        }
    }
}

impl From<&SpellConfig> for SpellOptions {
    fn from(config: &SpellConfig) -> Self {
        Self {
            enabled: config.enabled,
            min_word_length: config.min_word_length,
            ignore_capitalized: config.ignore_capitalized,
            max_edit_distance: config.max_edit_distance,
        }
    }
}

/// Corrects misspelled words in free text.
///
/// A corrector without a dictionary is a pass-through for its whole lifetime.
#[derive(Debug, Clone)]
pub struct SpellCorrector {
    dictionary: Option<Dictionary>,
    options: SpellOptions,
}

impl SpellCorrector {
    pub fn new(dictionary: Dictionary, options: SpellOptions) -> Self {
        Self {
            dictionary: Some(dictionary),
            options,
        }
    }

    /// A corrector that never changes its input.
    pub fn passthrough() -> Self {
        Self {
            dictionary: None,
            options: SpellOptions {
                enabled: false,
                ..SpellOptions::default()
            },
        }
    }

    /// Build a corrector from configuration.
    ///
    /// Loads `dictionary_path` when set, the embedded list otherwise. A
    /// dictionary that fails to load is logged and yields a pass-through.
    pub fn from_config(config: &SpellConfig) -> Self {
        let options = SpellOptions::from(config);
        if !options.enabled {
            debug!("spell correction disabled");
            return Self {
                dictionary: None,
                options,
            };
        }

        let loaded = match &config.dictionary_path {
            Some(path) => Dictionary::load(Path::new(path)),
            None => Dictionary::embedded(),
        };

        match loaded {
            Ok(dictionary) => {
                info!(words = dictionary.len(), "spell checker initialized");
                Self::new(dictionary, options)
            }
            Err(e) => {
                warn!(error = %e, "spell checker unavailable, passing text through");
                Self {
                    dictionary: None,
                    options,
                }
            }
        }
    }

    /// Whether this corrector can change text at all.
    pub fn is_active(&self) -> bool {
        self.options.enabled && self.dictionary.is_some()
    }

    /// Return `text` with misspelled words replaced.
    ///
    /// Everything outside the replaced words, including whitespace and
    /// punctuation, is preserved byte for byte.
    pub fn correct(&self, text: &str) -> String {
        let Some(dictionary) = self.dictionary.as_ref().filter(|_| self.options.enabled) else {
            return text.to_string();
        };
        if text.trim().is_empty() {
            return text.to_string();
        }

        let tokens: Vec<_> = WORD_PATTERN
            .find_iter(text)
            .filter(|m| self.is_candidate(m.as_str()))
            .collect();

        let mut corrected = text.to_string();
        for token in tokens.iter().rev() {
            if let Some(replacement) = self.correct_word(dictionary, token.as_str()) {
                corrected.replace_range(token.range(), &replacement);
            }
        }
        corrected
    }

    fn is_candidate(&self, word: &str) -> bool {
        // The dictionary holds ASCII words only; accented words are left alone.
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        if word.len() < self.options.min_word_length {
            return false;
        }
        if ALLOW_LIST.iter().any(|term| term.eq_ignore_ascii_case(word)) {
            return false;
        }
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        !(self.options.ignore_capitalized && capitalized)
    }

    /// The replacement for one token, or `None` to keep it.
    fn correct_word(&self, dictionary: &Dictionary, word: &str) -> Option<String> {
        let lower = word.to_lowercase();
        if dictionary.contains(&lower) {
            return None;
        }

        let suggestion = dictionary.correction(&lower, self.options.max_edit_distance)?;
        if suggestion == lower {
            return None;
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        Some(if capitalized {
            capitalize(suggestion)
        } else {
            suggestion.to_string()
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> SpellCorrector {
        let dict = Dictionary::from_words([
            "hello", "world", "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog",
            "receive", "weather",
        ])
        .unwrap();
        SpellCorrector::new(dict, SpellOptions::default())
    }

    #[test]
    fn corrects_single_word() {
        assert_eq!(corrector().correct("helo"), "hello");
    }

    #[test]
    fn restores_initial_capital() {
        assert_eq!(corrector().correct("Helo"), "Hello");
        assert_eq!(corrector().correct("HELO wrold"), "Hello world");
    }

    #[test]
    fn preserves_punctuation_and_spacing() {
        assert_eq!(
            corrector().correct("  helo,   wrold!\n the  "),
            "  hello,   world!\n the  "
        );
    }

    #[test]
    fn corrects_multiple_words_of_different_lengths() {
        assert_eq!(
            corrector().correct("the quik brwn fox jumsp ovr the lazzy dgo"),
            "the quick brown fox jumps over the lazy dog"
        );
    }

    #[test]
    fn allow_listed_terms_are_untouched() {
        let c = corrector();
        for term in ["api", "API", "Json", "html", "https", "url"] {
            assert_eq!(c.correct(term), term);
        }
    }

    #[test]
    fn short_tokens_and_numbers_are_untouched() {
        let c = corrector();
        assert_eq!(c.correct("ab"), "ab");
        assert_eq!(c.correct("123"), "123");
        assert_eq!(c.correct("ox 42 zz"), "ox 42 zz");
    }

    #[test]
    fn letters_split_by_digits_are_separate_tokens() {
        assert_eq!(corrector().correct("helo123wrold"), "hello123world");
    }

    #[test]
    fn min_word_length_is_configurable() {
        let dict = Dictionary::from_words(["hello"]).unwrap();
        let c = SpellCorrector::new(
            dict,
            SpellOptions {
                min_word_length: 5,
                ..SpellOptions::default()
            },
        );
        assert_eq!(c.correct("helo"), "helo");
        assert_eq!(c.correct("hellp"), "hello");
    }

    #[test]
    fn ignore_capitalized_skips_proper_nouns() {
        let dict = Dictionary::from_words(["hello"]).unwrap();
        let c = SpellCorrector::new(
            dict,
            SpellOptions {
                ignore_capitalized: true,
                ..SpellOptions::default()
            },
        );
        assert_eq!(c.correct("Helo helo"), "Helo hello");
    }

    #[test]
    fn unknown_word_without_candidates_is_kept() {
        assert_eq!(corrector().correct("xylophonist"), "xylophonist");
    }

    #[test]
    fn empty_and_whitespace_pass_through() {
        let c = corrector();
        assert_eq!(c.correct(""), "");
        assert_eq!(c.correct("   \t"), "   \t");
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        assert_eq!(corrector().correct("café helo"), "café hello");
    }

    #[test]
    fn words_with_non_ascii_letters_are_never_replaced() {
        let c = SpellCorrector::from_config(&SpellConfig::default());
        for text in ["el año nuevo", "a naïve approach", "über cool", "café latte", "Zürich résumé"] {
            assert_eq!(c.correct(text), text);
        }
    }

    #[test]
    fn non_ascii_word_is_kept_even_with_a_close_ascii_neighbour() {
        let dict = Dictionary::from_words(["cafe", "ago", "have"]).unwrap();
        let c = SpellCorrector::new(dict, SpellOptions::default());
        assert_eq!(c.correct("café año naïve"), "café año naïve");
    }

    #[test]
    fn passthrough_never_changes_text() {
        let c = SpellCorrector::passthrough();
        assert!(!c.is_active());
        assert_eq!(c.correct("helo wrold"), "helo wrold");
    }

    #[test]
    fn disabled_config_is_passthrough() {
        let config = SpellConfig {
            enabled: false,
            ..SpellConfig::default()
        };
        let c = SpellCorrector::from_config(&config);
        assert!(!c.is_active());
        assert_eq!(c.correct("helo"), "helo");
    }

    #[test]
    fn missing_dictionary_file_is_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let config = SpellConfig {
            dictionary_path: Some(dir.path().join("missing.txt").display().to_string()),
            ..SpellConfig::default()
        };
        let c = SpellCorrector::from_config(&config);
        assert!(!c.is_active());
        assert_eq!(c.correct("helo"), "helo");
    }

    #[test]
    fn default_config_uses_embedded_dictionary() {
        let c = SpellCorrector::from_config(&SpellConfig::default());
        assert!(c.is_active());
        assert_eq!(c.correct("the wrold"), "the world");
    }
}
