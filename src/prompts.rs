//! Instruction templates for the two task modes.
//!
//! Centralising the prompts here serves two purposes:
//!
//! 1. **Single source of truth** — rewording an instruction means
//!    editing exactly one constant.
//!
//! 2. **Testability** — the prefix/suffix properties of
//!    [`build_prompt`] are checked against these constants directly,
//!    without a live model anywhere near the tests.

use crate::session::Mode;

/// Instruction prefix for [`Mode::ExplainSimple`].
pub const EXPLAIN_SIMPLE_INSTRUCTION: &str = "Explain the following text as if speaking to a \
five-year-old child: simple words, short sentences, friendly examples.";

/// Instruction prefix for [`Mode::TopQuestions`].
pub const TOP_QUESTIONS_INSTRUCTION: &str = "Generate the 10 most frequently asked questions \
about the following topic, one per line.";

/// Concatenate the mode's fixed instruction with the user text.
///
/// The text is carried verbatim at the end — no truncation, no
/// reordering, no whitespace handling. Whitespace-only input is the
/// caller's concern (it is rejected during validation, never here).
pub fn build_prompt(mode: Mode, text: &str) -> String {
    let instruction = match mode {
        Mode::ExplainSimple => EXPLAIN_SIMPLE_INSTRUCTION,
        Mode::TopQuestions => TOP_QUESTIONS_INSTRUCTION,
    };
    format!("{instruction}\n\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_prompt_wraps_text_verbatim() {
        let p = build_prompt(Mode::ExplainSimple, "Newton's First Law");
        assert!(p.starts_with(EXPLAIN_SIMPLE_INSTRUCTION));
        assert!(p.ends_with("Newton's First Law"));
    }

    #[test]
    fn questions_prompt_wraps_text_verbatim() {
        let p = build_prompt(Mode::TopQuestions, "X");
        assert!(p.starts_with(TOP_QUESTIONS_INSTRUCTION));
        assert!(p.ends_with("X"));
    }

    #[test]
    fn text_is_not_trimmed_or_reordered() {
        let text = "  leading and trailing  ";
        let p = build_prompt(Mode::ExplainSimple, text);
        assert!(p.ends_with(text));
    }

    #[test]
    fn instruction_and_text_are_separated_by_a_blank_line() {
        let p = build_prompt(Mode::TopQuestions, "volcanoes");
        assert!(p.contains("\n\nvolcanoes"));
    }
}
