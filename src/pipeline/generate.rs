//! Drive one generation call under the configured deadline.
//!
//! There is deliberately no retry machinery here: a submission either
//! answers within the deadline or the user sees an inline error and
//! decides what to do. The outer `tokio::time::timeout` bounds every
//! [`TextGenerator`] implementation, including ones whose own
//! transport has no deadline of its own.

use crate::client::TextGenerator;
use crate::error::GenerationError;
use std::time::Duration;
use tracing::{debug, warn};

/// Run a single generation request, bounded by `timeout_secs`.
pub async fn generate(
    client: &dyn TextGenerator,
    prompt: &str,
    timeout_secs: u64,
) -> Result<String, GenerationError> {
    let deadline = Duration::from_secs(timeout_secs);
    match tokio::time::timeout(deadline, client.generate(prompt)).await {
        Ok(Ok(text)) => {
            debug!(chars = text.chars().count(), "generation succeeded");
            Ok(text)
        }
        Ok(Err(e)) => {
            warn!("generation failed: {e}");
            Err(e)
        }
        Err(_) => {
            warn!("generation timed out after {timeout_secs}s");
            Err(GenerationError::Timeout { secs: timeout_secs })
        }
    }
}
