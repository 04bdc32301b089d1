//! OllamaClient -- concrete [`GenerationClient`] implementation.
//!
//! Each generation call executes a bounded attempt loop driven by the
//! [`RetryPolicy`]: a non-streaming call first, falling back to a
//! streaming call when the non-streaming one times out on read or comes
//! back empty. Terminal failures map to fixed user-facing fallback
//! strings carrying an emotion tag; this client never returns an error
//! to its caller.

use companion_core::generation::{GenerationClient, RetryPolicy};
use companion_types::config::GenerationConfig;
use companion_types::error::GenerationError;
use futures_util::StreamExt;
use tracing::{debug, warn};

use super::types::{GenerateRequest, GenerateResponse, StreamFragment};

/// Fallback reply when every attempt timed out.
pub const FALLBACK_TIMEOUT: &str =
    "The reply took too long. Please try again. <emotion=sad>";
/// Fallback reply when the generation server cannot be reached.
pub const FALLBACK_CONNECT: &str =
    "I can't reach the generation server right now. Please check that it is running. <emotion=sad>";
/// Fallback reply when the server keeps returning error statuses.
pub const FALLBACK_STATUS: &str =
    "The generation server reported an error. <emotion=sad>";
/// Fallback reply for unexpected failures.
pub const FALLBACK_UNEXPECTED: &str =
    "I'm still getting ready to chat. Please try again in a moment. <emotion=neutral>";
/// Fallback reply when attempts exhaust without any text.
pub const FALLBACK_NO_RESPONSE: &str =
    "I didn't get a reply. Please try again. <emotion=sad>";

/// Generation client for an Ollama-style `/api/generate` endpoint.
///
/// Owns its reqwest client, constructed once and reused across calls.
pub struct OllamaClient {
    client: reqwest::Client,
    host: String,
    model: String,
    policy: RetryPolicy,
}

impl OllamaClient {
    /// Create a new client from the generation configuration.
    pub fn new(config: &GenerationConfig) -> Self {
        let policy = RetryPolicy::from_config(config);
        // Per-request timeouts come from the policy; the builder itself
        // carries no global timeout so streaming reads are not cut short
        // by a second clock.
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            policy,
        }
    }

    /// The configured default model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The configured host.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self) -> String {
        format!("{}/api/generate", self.host)
    }

    /// Send a short test prompt straight through, bypassing the retry
    /// loop and fallback absorption. Used by the generation health
    /// endpoint to report the real failure.
    pub async fn probe(&self) -> Result<String, GenerationError> {
        self.complete(&self.model, "Reply with one short friendly sentence.")
            .await
    }

    /// One attempt: non-streaming call, then streaming fallback on read
    /// timeout or empty body. `Ok(None)` means the attempt completed but
    /// produced no text.
    async fn attempt(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<Option<String>, GenerationError> {
        match self.complete(model, prompt).await {
            Ok(text) if !text.is_empty() => return Ok(Some(text)),
            Ok(_) => {
                debug!("non-streaming reply was empty, falling back to streaming");
            }
            Err(GenerationError::Timeout) => {
                warn!("non-streaming call timed out, falling back to streaming");
            }
            Err(e) => return Err(e),
        }

        let text = self.complete_streaming(model, prompt).await?;
        Ok((!text.is_empty()).then_some(text))
    }

    /// Non-streaming call: single JSON object `{response}`.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.url())
            .timeout(self.policy.timeout)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(classify)?;
        Ok(body.response.trim().to_string())
    }

    /// Streaming call: accumulate `{response}` fragments line-by-line
    /// until `{done:true}` or the stream closes. Malformed lines are
    /// skipped, not fatal.
    async fn complete_streaming(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.url())
            .timeout(self.policy.timeout)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: true,
            })
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Network chunks can split a multi-byte character, so the pending
        // buffer stays raw bytes and decoding happens only on complete lines.
        let mut accumulated = String::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut done = false;
        let mut stream = response.bytes_stream();

        'read: while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(classify)?;
            pending.extend_from_slice(&chunk);

            while let Some(newline) = pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = pending.drain(..=newline).collect();
                let line = String::from_utf8_lossy(&line);
                if push_stream_line(&mut accumulated, line.trim_end()) {
                    done = true;
                    break 'read;
                }
            }
        }
        // Trailing line without a newline terminator.
        if !done {
            let line = String::from_utf8_lossy(&pending);
            push_stream_line(&mut accumulated, line.trim_end());
        }

        Ok(accumulated.trim().to_string())
    }
}

/// Fold one stream line into the accumulated reply. Returns true when the
/// server signalled completion. Blank and malformed lines are skipped.
fn push_stream_line(accumulated: &mut String, line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    match serde_json::from_str::<StreamFragment>(line) {
        Ok(fragment) => {
            accumulated.push_str(&fragment.response);
            fragment.done
        }
        Err(e) => {
            debug!(error = %e, "skipping malformed stream line");
            false
        }
    }
}

/// Map a reqwest error into the internal failure classification.
fn classify(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::Connect(e.to_string())
    } else {
        GenerationError::Other(e.to_string())
    }
}

impl GenerationClient for OllamaClient {
    async fn generate(&self, prompt: &str, model: Option<&str>) -> String {
        let model = model.unwrap_or(&self.model);

        for attempt in 1..=self.policy.max_attempts {
            match self.attempt(model, prompt).await {
                Ok(Some(text)) => return text,
                Ok(None) => {
                    warn!(attempt, "generation attempt produced no text");
                }
                Err(GenerationError::Timeout) => {
                    warn!(attempt, "generation attempt timed out");
                    if !self.policy.should_retry(attempt) {
                        return FALLBACK_TIMEOUT.to_string();
                    }
                }
                Err(GenerationError::Connect(message)) => {
                    // Retrying a dead server is pointless; bail at once.
                    warn!(%message, "generation server unreachable");
                    return FALLBACK_CONNECT.to_string();
                }
                Err(GenerationError::Status { status, body }) => {
                    warn!(attempt, status, %body, "generation server returned error status");
                    if !self.policy.should_retry(attempt) {
                        return FALLBACK_STATUS.to_string();
                    }
                }
                Err(GenerationError::Other(message)) => {
                    warn!(attempt, %message, "unexpected generation failure");
                    if !self.policy.should_retry(attempt) {
                        return FALLBACK_UNEXPECTED.to_string();
                    }
                }
            }
        }

        FALLBACK_NO_RESPONSE.to_string()
    }
}
