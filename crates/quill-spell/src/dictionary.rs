// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Word-frequency dictionary with edit-distance lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// English frequency list compiled into the binary.
const EMBEDDED_WORDS: &str = include_str!("../data/words.txt");

/// Errors raised while loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The dictionary file could not be read.
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source contained no usable entries.
    #[error("dictionary contains no words")]
    Empty,
}

/// A set of known lowercase ASCII words with relative frequencies.
#[derive(Debug, Clone)]
pub struct Dictionary {
    frequencies: HashMap<String, u64>,
    /// Entries sorted by length for the candidate scan.
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    word: String,
    count: u64,
    letters: u32,
}

/// Bit set of the ASCII letters in `word`.
///
/// One edit changes at most two bits, so words `d` edits apart differ in at
/// most `2 * d` bits.
fn letter_mask(word: &str) -> u32 {
    word.bytes()
        .filter(u8::is_ascii_lowercase)
        .fold(0, |mask, b| mask | 1u32 << (b - b'a'))
}

impl Dictionary {
    /// The embedded English frequency list.
    pub fn embedded() -> Result<Self, DictionaryError> {
        Self::parse(EMBEDDED_WORDS)
    }

    /// Load a frequency list from disk.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a frequency list: one `word [count]` entry per line.
    ///
    /// Blank lines and `#` comments are skipped. A missing count means 1.
    /// Entries that are not purely ASCII letters are dropped.
    pub fn parse(content: &str) -> Result<Self, DictionaryError> {
        let mut skipped = 0usize;
        let pairs = content.lines().filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let mut fields = line.split_whitespace();
            let word = fields.next()?;
            let count = fields.next().and_then(|c| c.parse().ok()).unwrap_or(1);
            if word.chars().all(|c| c.is_ascii_alphabetic()) {
                Some((word.to_ascii_lowercase(), count))
            } else {
                skipped += 1;
                None
            }
        });
        let dictionary = Self::from_frequencies(pairs.collect::<Vec<_>>())?;
        if skipped > 0 {
            debug!(skipped, "dropped non-alphabetic dictionary entries");
        }
        Ok(dictionary)
    }

    /// Build a dictionary from `(word, count)` pairs. Repeated words sum their counts.
    pub fn from_frequencies<I, S>(pairs: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut frequencies: HashMap<String, u64> = HashMap::new();
        for (word, count) in pairs {
            let word: String = word.into();
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            *frequencies.entry(word.to_ascii_lowercase()).or_default() += count;
        }
        if frequencies.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let mut entries: Vec<Entry> = frequencies
            .iter()
            .map(|(word, &count)| Entry {
                word: word.clone(),
                count,
                letters: letter_mask(word),
            })
            .collect();
        entries.sort_by(|a, b| {
            a.word
                .len()
                .cmp(&b.word.len())
                .then_with(|| a.word.cmp(&b.word))
        });

        Ok(Self {
            frequencies,
            entries,
        })
    }

    /// Build a dictionary in which every word has frequency 1.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_frequencies(words.into_iter().map(|w| (w, 1)))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether the dictionary is empty. Always false for a constructed dictionary.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Whether `word` (already lowercased) is known.
    pub fn contains(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
    }

    /// Frequency of `word`, if known.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.frequencies.get(word).copied()
    }

    /// The best known word within `max_distance` edits of `word`.
    ///
    /// Known words are returned as-is. Otherwise candidates are ranked by
    /// optimal-string-alignment distance, then by descending frequency, then
    /// alphabetically.
    pub fn correction(&self, word: &str, max_distance: usize) -> Option<&str> {
        if let Some((known, _)) = self.frequencies.get_key_value(word) {
            return Some(known.as_str());
        }
        if max_distance == 0 {
            return None;
        }

        // Single edits are enumerated and looked up directly.
        let single = self.most_frequent(single_edits(word).iter().map(String::as_str));
        if single.is_some() || max_distance == 1 {
            return single;
        }

        let len = word.chars().count();
        let min_len = len.saturating_sub(max_distance);
        let max_len = len + max_distance;
        let letters = letter_mask(word);
        let start = self.entries.partition_point(|e| e.word.len() < min_len);

        self.entries[start..]
            .iter()
            .take_while(|e| e.word.len() <= max_len)
            .filter(|e| (e.letters ^ letters).count_ones() as usize <= 2 * max_distance)
            .filter_map(|e| {
                let distance = strsim::osa_distance(word, &e.word);
                (distance <= max_distance).then_some((distance, e.count, e.word.as_str()))
            })
            .min_by(|a, b| {
                a.0.cmp(&b.0)
                    .then_with(|| b.1.cmp(&a.1))
                    .then_with(|| a.2.cmp(b.2))
            })
            .map(|(_, _, candidate)| candidate)
    }

    /// The known word among `candidates` with the highest frequency, ties
    /// broken alphabetically.
    fn most_frequent<'a>(&self, candidates: impl Iterator<Item = &'a str>) -> Option<&str> {
        candidates
            .filter_map(|c| self.frequencies.get_key_value(c))
            .min_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
            .map(|(word, _)| word.as_str())
    }
}

/// Every string one deletion, adjacent transposition, substitution or
/// insertion away from `word`, over the lowercase ASCII alphabet.
fn single_edits(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut edits = Vec::with_capacity(54 * n + 26);
    let join = |parts: &[&[char]]| parts.iter().flat_map(|p| p.iter()).collect::<String>();

    for i in 0..n {
        edits.push(join(&[&chars[..i], &chars[i + 1..]]));
        if i + 1 < n {
            edits.push(join(&[&chars[..i], &[chars[i + 1], chars[i]][..], &chars[i + 2..]]));
        }
        for c in 'a'..='z' {
            if c != chars[i] {
                edits.push(join(&[&chars[..i], &[c][..], &chars[i + 1..]]));
            }
        }
    }
    for i in 0..=n {
        for c in 'a'..='z' {
            edits.push(join(&[&chars[..i], &[c][..], &chars[i..]]));
        }
    }
    edits
}
