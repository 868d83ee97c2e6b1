//! Per-tab session state and the single update path that mutates it.
//!
//! Page-global mutable state re-read on every widget interaction is
//! the easy trap for a tool like this. Here the state is an explicit
//! [`Session`] value and the only way to change it is [`update`]: a
//! pure function from an [`Action`] to a new state plus any
//! [`Effect`]s the caller must execute. UI handlers translate widget
//! events into actions, run the returned effects, and feed the
//! outcomes back in as further actions — nothing else touches the
//! fields.
//!
//! The submission lifecycle is
//! `Idle → validating → (rejected | Requesting) → (displayed | failed)`,
//! where validation happens inside the `Submitted` arm and both
//! outcomes of a request return the session to `Idle`.

use crate::error::{ExtractionError, GenerationError};
use crate::pipeline::collect;
use crate::pipeline::extract::ExtractedDocument;
use crate::prompts::build_prompt;
use serde::{Deserialize, Serialize};

/// The selected task: determines the instruction template, the result
/// panel title, and its accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// "Explain Like I'm 5": simple words, short sentences.
    #[default]
    ExplainSimple,
    /// Top 10 frequently asked questions about the topic.
    TopQuestions,
}

/// Where the input text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputSource {
    /// Typed or pasted directly into the text area.
    #[default]
    PastedText,
    /// Extracted from an uploaded PDF document.
    UploadedPdf,
}

/// Whether a generation request is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Requesting,
}

/// A one-render banner shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Neutral feedback, e.g. an extraction summary.
    Info(String),
    /// Recoverable rejection (validation, unreadable upload).
    Warning(String),
    /// A generation failure.
    Error(String),
}

/// Transient per-tab state.
///
/// Created on first page load, mutated only through [`update`],
/// discarded when the tab's cookie dies. Never persisted and never
/// shared between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub mode: Mode,
    pub input_source: InputSource,
    pub input_text: String,
    /// The most recent successful generation for the current mode.
    pub last_result: Option<String>,
    pub notice: Option<Notice>,
    pub phase: Phase,
    /// Character limit snapshotted from the config at creation.
    max_input_chars: usize,
}

impl Session {
    pub fn new(max_input_chars: usize) -> Self {
        Session {
            mode: Mode::default(),
            input_source: InputSource::default(),
            input_text: String::new(),
            last_result: None,
            notice: None,
            phase: Phase::default(),
            max_input_chars,
        }
    }

    /// The character limit this session validates pasted text against.
    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }
}

/// A user interaction or the outcome of an executed [`Effect`].
#[derive(Debug, Clone)]
pub enum Action {
    /// User picked a task mode.
    ModeSelected(Mode),
    /// User picked an input source.
    SourceSelected(InputSource),
    /// User edited the text area (full replacement on each rerender).
    InputEdited(String),
    /// A PDF upload finished extracting (or failed to).
    PdfExtracted(Result<ExtractedDocument, ExtractionError>),
    /// User pressed the submit button.
    Submitted,
    /// The generation effect completed.
    GenerationFinished(Result<String, GenerationError>),
}

/// Work the caller must perform after an [`update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the generation endpoint with this prompt and feed the
    /// outcome back as [`Action::GenerationFinished`].
    Generate { prompt: String },
}

/// Pure update function: applies an action and returns any effects.
pub fn update(session: &mut Session, action: Action) -> Vec<Effect> {
    match action {
        Action::ModeSelected(mode) => {
            if mode != session.mode {
                session.mode = mode;
                // A result generated under the old mode must not be
                // re-labelled under the new heading.
                session.last_result = None;
            }
            Vec::new()
        }

        Action::SourceSelected(source) => {
            if source != session.input_source {
                session.input_source = source;
                session.input_text.clear();
                session.notice = None;
            }
            Vec::new()
        }

        Action::InputEdited(text) => {
            session.input_text = text;
            Vec::new()
        }

        Action::PdfExtracted(Ok(doc)) => {
            session.notice = Some(Notice::Info(format!(
                "Extracted {} characters from {} page{}.",
                collect::char_count(&doc.text),
                doc.pages,
                if doc.pages == 1 { "" } else { "s" }
            )));
            session.input_text = doc.text;
            Vec::new()
        }

        Action::PdfExtracted(Err(e)) => {
            // Unreadable upload: surface it and treat the input as empty.
            session.input_text.clear();
            session.notice = Some(Notice::Warning(e.to_string()));
            Vec::new()
        }

        Action::Submitted => {
            if session.phase == Phase::Requesting {
                // Re-entrant click while a request is in flight.
                return Vec::new();
            }
            session.notice = None;
            match collect::validate(
                &session.input_text,
                session.input_source,
                session.max_input_chars,
            ) {
                Err(e) => {
                    session.notice = Some(Notice::Warning(e.to_string()));
                    Vec::new()
                }
                Ok(()) => {
                    session.phase = Phase::Requesting;
                    vec![Effect::Generate {
                        prompt: build_prompt(session.mode, &session.input_text),
                    }]
                }
            }
        }

        Action::GenerationFinished(outcome) => {
            session.phase = Phase::Idle;
            match outcome {
                Ok(text) => {
                    session.last_result = Some(text);
                    session.notice = None;
                }
                Err(e) => {
                    session.last_result = None;
                    session.notice = Some(Notice::Error(e.to_string()));
                }
            }
            Vec::new()
        }
    }
}
