//! Generation client trait and retry policy.
//!
//! The client contract is infallible: expected failure modes (timeouts,
//! connection errors, bad statuses) are absorbed by the implementation
//! and converted into an in-band fallback reply carrying an emotion tag.
//! The caller never sees a generation error.

use companion_types::config::GenerationConfig;

use std::time::Duration;

/// A client for the external generation server.
///
/// Implementations live in companion-infra (e.g. `OllamaClient`).
/// `generate` never fails; on terminal errors it returns a user-facing
/// fallback string instead.
pub trait GenerationClient: Send + Sync {
    /// Generate a reply for `prompt`, using `model` when given and the
    /// configured default otherwise.
    fn generate(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> impl std::future::Future<Output = String> + Send;
}

/// Retry policy for generation calls, expressed as a data value rather
/// than inline branching.
///
/// One attempt = a non-streaming call with `timeout`, falling back to a
/// streaming call on read timeout. `max_attempts` bounds the whole loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Derive the policy from the generation configuration.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Whether another attempt may run after `attempt` failed.
    /// `attempt` is 1-based (first execution is attempt 1).
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}
