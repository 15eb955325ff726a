// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed prompts sent with every suggestion request.

/// Inputs whose trimmed length is below this many characters are not sent.
pub const MIN_INPUT_CHARS: usize = 3;

/// System role instructions.
pub const SYSTEM_PROMPT: &str = "\
You are an intelligent text suggestion assistant. Your task is to provide helpful,
context-aware text suggestions as the user types. Consider the following guidelines:

1. Analyze the user's current text and predict what they might want to type next
2. Provide concise, relevant suggestions that flow naturally from their current text
3. Consider the context, tone, and purpose of their writing
4. For technical or specialized content, offer domain-specific suggestions
5. For creative writing, suggest compelling continuations that match their style

Provide ONLY the suggested text continuation without any explanations or prefixes.
";

/// User role content for `text`.
pub fn user_prompt(text: &str) -> String {
    format!("Based on this text, suggest a natural continuation:\n\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_text_after_blank_line() {
        assert_eq!(
            user_prompt("Once upon"),
            "Based on this text, suggest a natural continuation:\n\nOnce upon"
        );
    }

    #[test]
    fn system_prompt_demands_bare_continuation() {
        assert!(SYSTEM_PROMPT.starts_with("You are an intelligent text suggestion assistant."));
        assert!(SYSTEM_PROMPT.contains("Provide ONLY the suggested text continuation"));
    }
}
