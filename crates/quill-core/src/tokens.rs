// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Approximate token counting.
//!
//! Usage that a provider does not report is estimated at four characters
//! per token.

/// Characters per token used by [`estimate_tokens`].
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `text` as `chars / 4`, rounded down.
pub fn estimate_tokens(text: &str) -> u32 {
    let tokens = text.chars().count() / CHARS_PER_TOKEN;
    u32::try_from(tokens).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_text_is_zero_tokens() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 8 characters, 16 bytes.
        assert_eq!(estimate_tokens("éééééééé"), 2);
    }

    #[test]
    fn rounds_down() {
        assert_eq!(estimate_tokens("abc"), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcdefg"), 1);
    }

    proptest! {
        #[test]
        fn estimate_never_exceeds_char_count(s in ".{0,200}") {
            prop_assert!(estimate_tokens(&s) as usize <= s.chars().count());
        }
    }
}
