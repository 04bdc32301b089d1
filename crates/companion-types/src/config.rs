//! Generation endpoint configuration.
//!
//! `GenerationConfig` is an explicit value constructed at startup and
//! passed to the generation client -- there is no global mutable
//! configuration object.

use serde::{Deserialize, Serialize};

/// Configuration for the external generation server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the generation server (e.g. `http://127.0.0.1:11434`).
    #[serde(default = "default_host")]
    pub host: String,

    /// Default model name used when a request names none.
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-call request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum attempts per generation call (non-streaming + streaming
    /// fallback count as one attempt).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_host() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_model() -> String {
    "gemma3:12b".to_string()
}

fn default_timeout_secs() -> u64 {
    180
}

fn default_max_attempts() -> u32 {
    2
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = GenerationConfig::default();
        assert_eq!(config.host, "http://127.0.0.1:11434");
        assert_eq!(config.timeout_secs, 180);
        assert_eq!(config.max_attempts, 2);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: GenerationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.model, "gemma3:12b");
    }

    #[test]
    fn test_deserialize_overrides() {
        let config: GenerationConfig = serde_json::from_str(
            r#"{"host": "http://10.0.0.5:11434", "model": "llama3.3", "max_attempts": 3}"#,
        )
        .unwrap();
        assert_eq!(config.host, "http://10.0.0.5:11434");
        assert_eq!(config.model, "llama3.3");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.timeout_secs, 180);
    }
}
