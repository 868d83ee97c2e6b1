//! # eli5-web
//!
//! A single-page web tool that explains pasted text (or an uploaded
//! PDF) in five-year-old terms, or lists the top questions people ask
//! about it, by sending one fixed instruction prompt per submission to
//! the Gemini generation endpoint.
//!
//! All of the language understanding lives on the other side of that
//! API call. What this crate owns is the part around it, done
//! carefully: an explicit per-session state machine with a single
//! update path, typed errors at every collaborator boundary, and a
//! page that degrades to an inline message on every failure instead of
//! falling over.
//!
//! ## Flow Overview
//!
//! ```text
//! form / PDF
//!  │
//!  ├─ 1. Collect   validate input (empty check, character limit)
//!  ├─ 2. Prompt    fixed instruction template + user text
//!  ├─ 3. Generate  one call to the Gemini endpoint, bounded timeout
//!  └─ 4. Present   tidy the text, render the titled result panel
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eli5_web::{drive, Action, AppConfig, GeminiClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read once from GEMINI_API_KEY; absence is fatal here.
//!     let config = AppConfig::from_env()?;
//!     let client = GeminiClient::new(&config)?;
//!
//!     let mut session = Session::new(config.max_input_chars);
//!     drive(
//!         &mut session,
//!         Action::InputEdited("Newton's First Law".into()),
//!         &client,
//!         &config,
//!     )
//!     .await;
//!     drive(&mut session, Action::Submitted, &client, &config).await;
//!
//!     println!("{}", session.last_result.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! The `server` feature (on by default) adds the axum page server and
//! the `eli5-web` binary; disable it to use only the library:
//!
//! ```toml
//! eli5-web = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod submit;
pub mod view;

#[cfg(feature = "server")]
pub mod web;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{GeminiClient, TextGenerator};
pub use config::{AppConfig, AppConfigBuilder};
pub use error::{ConfigError, ExtractionError, GenerationError, ValidationError};
pub use prompts::build_prompt;
pub use session::{update, Action, Effect, InputSource, Mode, Notice, Phase, Session};
pub use submit::drive;

#[cfg(feature = "server")]
pub use web::{router, serve, ServeError};
