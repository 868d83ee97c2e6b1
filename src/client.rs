//! The generation endpoint client.
//!
//! [`TextGenerator`] is the seam between the session flow and the
//! network: one method, prompt in, text out. The live implementation,
//! [`GeminiClient`], is a thin reqwest wrapper around the
//! `generateContent` REST call — all prompt engineering lives in
//! [`crate::prompts`] and all request pacing (the single timeout, the
//! absence of retries) lives in [`crate::pipeline::generate`], so this
//! module is only concerned with the wire format and with mapping
//! transport/API failures into [`GenerationError`].

use crate::config::AppConfig;
use crate::error::{ConfigError, GenerationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Anything that can turn a prompt into generated text.
///
/// The page server holds a `dyn TextGenerator`, which is what lets the
/// whole submission flow run in tests against a scripted fake.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Live client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: usize,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Build a client from the application config.
    ///
    /// The request deadline is baked into the underlying HTTP client;
    /// [`crate::pipeline::generate`] adds an outer guard with the same
    /// budget so scripted generators are bounded too.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("HTTP client: {e}")))?;

        Ok(GeminiClient {
            http,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            timeout_secs: config.api_timeout_secs,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        debug!(prompt_chars = prompt.chars().count(), "calling generation endpoint");

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "generation endpoint rejected the request");
            return Err(api_error(status.as_u16(), &body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport {
                reason: format!("invalid response body: {e}"),
            })?;

        candidate_text(parsed)
    }
}

fn map_transport_error(e: reqwest::Error, timeout_secs: u64) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout { secs: timeout_secs }
    } else {
        GenerationError::Transport {
            reason: e.to_string(),
        }
    }
}

/// Turn a non-success status plus its body into a typed error,
/// preferring the endpoint's own error message when the body carries
/// one.
fn api_error(status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no error detail provided".to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        });
    GenerationError::Api { status, message }
}

/// Pull the generated text out of a parsed response.
fn candidate_text(response: GenerateResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .flat_map(|c| c.content.and_then(|c| c.parts).unwrap_or_default())
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}
