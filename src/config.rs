//! Application configuration.
//!
//! Every knob lives in one [`AppConfig`] struct built through its
//! validating [`AppConfigBuilder`]. Keeping the knobs together makes
//! it trivial to share the config across handlers and to diff two
//! deployments to understand why their behaviour differs.
//!
//! The API credential is resolved exactly once, at startup, via
//! [`AppConfig::from_env`]. A missing credential is a fatal
//! [`ConfigError`] — the server never starts in a state where every
//! submission would fail with an authentication error.

use crate::error::ConfigError;
use std::fmt;

/// Name of the environment variable holding the Gemini API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default base URL of the generation endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Configuration for the page server and the generation client.
///
/// Built via [`AppConfig::builder`] (when the credential is already in
/// hand) or [`AppConfig::from_env`] (the normal startup path).
#[derive(Clone)]
pub struct AppConfig {
    /// Gemini API credential. Never logged; `Debug` redacts it.
    pub api_key: String,

    /// Generation model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Base URL of the generation endpoint. Default: [`DEFAULT_API_BASE`].
    ///
    /// Overridable so tests can point the client at a local stub
    /// without touching the rest of the config.
    pub api_base: String,

    /// Hard character limit for pasted text. Default: 1000.
    ///
    /// Counted in Unicode scalar values to match the live counter
    /// shown under the text area. Applies to the pasted-text source
    /// only; extracted PDF text routinely exceeds it.
    pub max_input_chars: usize,

    /// Sampling temperature. Default: 0.7.
    ///
    /// Explanations for a five-year-old benefit from a little
    /// creativity (friendly examples, analogies); transcription-grade
    /// determinism is not a goal here.
    pub temperature: f32,

    /// Maximum tokens the model may generate per request. Default: 1024.
    pub max_output_tokens: usize,

    /// Per-request deadline in seconds. Default: 60.
    ///
    /// The single bounded timeout in the system. There are no retries:
    /// a submission either answers within the deadline or surfaces an
    /// inline error and returns control to the user.
    pub api_timeout_secs: u64,

    /// Maximum accepted PDF upload size in bytes. Default: 10 MiB.
    pub max_upload_bytes: usize,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("max_input_chars", &self.max_input_chars)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl AppConfig {
    /// Create a builder seeded with defaults and the given credential.
    pub fn builder(api_key: impl Into<String>) -> AppConfigBuilder {
        AppConfigBuilder {
            config: AppConfig {
                api_key: api_key.into(),
                model: DEFAULT_MODEL.to_string(),
                api_base: DEFAULT_API_BASE.to_string(),
                max_input_chars: 1000,
                temperature: 0.7,
                max_output_tokens: 1024,
                api_timeout_secs: 60,
                max_upload_bytes: 10 * 1024 * 1024,
            },
        }
    }

    /// Resolve the credential from [`API_KEY_VAR`] and build a default
    /// configuration.
    ///
    /// # Errors
    /// [`ConfigError::MissingApiKey`] when the variable is unset or
    /// blank — the fatal startup condition.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        Self::from_env_var(API_KEY_VAR)
    }

    /// Like [`AppConfig::from_env`], reading the named variable
    /// instead. Exists so tests can use process-unique variable names.
    pub fn from_env_var(var: &str) -> Result<AppConfig, ConfigError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Self::builder(key).build(),
            _ => Err(ConfigError::MissingApiKey {
                var: var.to_string(),
            }),
        }
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.config.api_base = base.into();
        self
    }

    pub fn max_input_chars(mut self, n: usize) -> Self {
        self.config.max_input_chars = n.max(1);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_output_tokens(mut self, n: usize) -> Self {
        self.config.max_output_tokens = n.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn max_upload_bytes(mut self, n: usize) -> Self {
        self.config.max_upload_bytes = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("API key must not be empty".into()));
        }
        if c.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".into()));
        }
        if !c.api_base.starts_with("http://") && !c.api_base.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api_base must be an HTTP(S) URL, got '{}'",
                c.api_base
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::builder("k").build().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_input_chars, 1000);
        assert_eq!(config.api_timeout_secs, 60);
    }

    #[test]
    fn builder_clamps() {
        let config = AppConfig::builder("k")
            .temperature(9.0)
            .max_input_chars(0)
            .api_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.temperature, 2.0);
        assert_eq!(config.max_input_chars, 1);
        assert_eq!(config.api_timeout_secs, 1);
    }

    #[test]
    fn blank_key_is_invalid() {
        assert!(matches!(
            AppConfig::builder("   ").build(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn api_base_must_be_http() {
        assert!(AppConfig::builder("k").api_base("ftp://x").build().is_err());
    }

    #[test]
    fn from_env_missing_is_fatal() {
        // Unique variable name so parallel tests cannot race on it.
        let err = AppConfig::from_env_var("ELI5_WEB_TEST_KEY_DEFINITELY_UNSET").unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn debug_redacts_the_key() {
        let config = AppConfig::builder("super-secret").build().unwrap();
        let dump = format!("{config:?}");
        assert!(!dump.contains("super-secret"));
        assert!(dump.contains("<redacted>"));
    }
}
