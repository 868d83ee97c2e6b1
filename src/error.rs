//! Error types for the eli5-web library.
//!
//! One enum per collaborator boundary, matching how failures are
//! surfaced to the user:
//!
//! * [`ConfigError`] — **Fatal**: the process cannot start at all
//!   (missing credential, nonsensical settings). Returned before the
//!   listener binds; never shown inside the page.
//!
//! * [`ValidationError`] — Recoverable: the submission was rejected
//!   before any network call. Rendered as an inline warning; the
//!   session is otherwise untouched.
//!
//! * [`GenerationError`] — Recoverable: the generation endpoint or the
//!   transport failed. Rendered as an inline error; the previous
//!   result is cleared.
//!
//! * [`ExtractionError`] — Recoverable: the uploaded PDF could not be
//!   read. Rendered as a warning; the input is treated as empty.
//!
//! Every failure path ends in a user-visible message. Nothing is
//! retried automatically and nothing is silently swallowed.

use thiserror::Error;

/// Fatal startup errors. The server refuses to start on any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API credential environment variable is missing or empty.
    #[error("API key not found: set the {var} environment variable before starting")]
    MissingApiKey { var: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Submission rejected before any generation call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The trimmed input was empty.
    #[error("Please provide some text first.")]
    Empty,

    /// Pasted text exceeded the configured character limit.
    #[error("Please keep the text under {max} characters (currently {chars}).")]
    TooLong { chars: usize, max: usize },
}

/// A generation request failed.
///
/// The variants distinguish where the failure happened so the inline
/// message can be specific, but all of them degrade the same way: an
/// error banner, no retry.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The request never produced an HTTP response.
    #[error("Could not reach the generation endpoint: {reason}")]
    Transport { reason: String },

    /// The endpoint answered with a non-success status.
    #[error("Generation endpoint returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// A well-formed response carried no usable text.
    #[error("The model returned an empty response")]
    EmptyResponse,

    /// The call exceeded the configured deadline.
    #[error("Generation timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// An uploaded document could not be turned into text.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// The upload is not a PDF at all.
    #[error("That file does not look like a PDF (first bytes: {magic:?})")]
    NotAPdf { magic: [u8; 4] },

    /// The parser rejected the document (corrupt, encrypted, …).
    #[error("Could not read the PDF: {detail}")]
    Unreadable { detail: String },
}
