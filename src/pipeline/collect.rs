//! Input collection: character counting and submission validation.
//!
//! This is the gate in front of the generation call — a submission
//! that fails here must never reach the network. Counting uses
//! Unicode scalar values, not bytes, so the number the validator
//! enforces is the same number the page's live counter shows.

use crate::error::ValidationError;
use crate::session::InputSource;

/// Characters as the user perceives the counter: Unicode scalar
/// values, not UTF-8 bytes.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Validate a submission before any generation call.
///
/// * Trimmed-empty input is rejected for every source.
/// * The hard character limit applies to pasted text only; documents
///   brought in through the PDF path routinely exceed it.
pub fn validate(
    text: &str,
    source: InputSource,
    max_chars: usize,
) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if source == InputSource::PastedText {
        let chars = char_count(text);
        if chars > max_chars {
            return Err(ValidationError::TooLong {
                chars,
                max: max_chars,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_scalar_values_not_bytes() {
        // Six characters, ten bytes.
        let text = "héllö✓";
        assert_eq!(char_count(text), 6);
        assert!(text.len() > 6);
    }

    #[test]
    fn empty_and_whitespace_rejected() {
        for text in ["", "   ", "\n\t "] {
            assert_eq!(
                validate(text, InputSource::PastedText, 1000),
                Err(ValidationError::Empty),
                "input {text:?}"
            );
        }
    }

    #[test]
    fn limit_is_inclusive() {
        let at_limit = "a".repeat(1000);
        assert!(validate(&at_limit, InputSource::PastedText, 1000).is_ok());

        let over = "a".repeat(1001);
        assert_eq!(
            validate(&over, InputSource::PastedText, 1000),
            Err(ValidationError::TooLong {
                chars: 1001,
                max: 1000
            })
        );
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        // 600 two-byte characters: 1200 bytes but only 600 chars.
        let text = "é".repeat(600);
        assert!(validate(&text, InputSource::PastedText, 1000).is_ok());
    }

    #[test]
    fn pdf_source_is_not_length_limited() {
        let long = "a".repeat(50_000);
        assert!(validate(&long, InputSource::UploadedPdf, 1000).is_ok());
    }
}
