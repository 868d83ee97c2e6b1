//! PDF text extraction: uploaded bytes → plain text, page by page.
//!
//! Parsing itself is delegated to the `pdf-extract` crate; this module
//! owns the policy around it. The magic bytes are checked first so an
//! accidental `.docx` or image upload gets a precise "not a PDF"
//! message instead of whatever the parser happens to say about it.
//! Pages whose extraction yields nothing (scanned images, decorative
//! pages) are skipped; the remaining page texts are joined with a
//! newline. A document where every page is blank extracts to the
//! empty string, which downstream validation treats as empty input —
//! that is not an error here.

use crate::error::ExtractionError;
use tracing::{debug, warn};

/// Text pulled out of one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Non-blank page texts joined with `\n`. May be empty.
    pub text: String,
    /// Total pages in the document, blank ones included.
    pub pages: usize,
}

/// Extract the text of an uploaded PDF.
///
/// # Errors
/// [`ExtractionError::NotAPdf`] when the magic bytes are wrong;
/// [`ExtractionError::Unreadable`] when the parser rejects the
/// document (corrupt structure, unsupported encryption, …).
pub fn pdf_text(bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
    check_magic(bytes)?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
        warn!("PDF extraction failed: {e}");
        ExtractionError::Unreadable {
            detail: e.to_string(),
        }
    })?;

    let total = pages.len();
    let text = join_pages(pages);
    debug!(pages = total, chars = text.chars().count(), "extracted PDF text");

    Ok(ExtractedDocument { text, pages: total })
}

/// Reject anything that does not start with `%PDF`.
fn check_magic(bytes: &[u8]) -> Result<(), ExtractionError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        for (slot, byte) in magic.iter_mut().zip(bytes.iter()) {
            *slot = *byte;
        }
        return Err(ExtractionError::NotAPdf { magic });
    }
    Ok(())
}

/// Join per-page texts, skipping pages with nothing extractable.
fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_pdf_bytes_are_rejected_by_magic() {
        let err = pdf_text(b"PK\x03\x04 not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractionError::NotAPdf { magic } if &magic == b"PK\x03\x04"));
    }

    #[test]
    fn truncated_upload_is_rejected() {
        assert!(matches!(
            pdf_text(b"%P"),
            Err(ExtractionError::NotAPdf { .. })
        ));
    }

    #[test]
    fn corrupt_pdf_surfaces_unreadable() {
        // Right magic, garbage structure: must error, never panic.
        let err = pdf_text(b"%PDF-1.7 then nothing sensible").unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable { .. }));
    }

    #[test]
    fn blank_pages_are_skipped_when_joining() {
        let joined = join_pages(vec![
            "first page".into(),
            "   ".into(),
            String::new(),
            "last page".into(),
        ]);
        assert_eq!(joined, "first page\nlast page");
    }

    #[test]
    fn all_blank_pages_join_to_empty() {
        assert_eq!(join_pages(vec!["  ".into(), "\n".into()]), "");
    }
}
