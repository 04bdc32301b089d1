//! Global application settings stored as a single row.

use serde::{Deserialize, Serialize};

use std::collections::HashMap;

/// Global settings, a single row with fixed id 1.
///
/// Lazily created with defaults on first read. `api_endpoint` and
/// `model_preset` override the configured generation host and model;
/// `user_profile` is a free-form string map describing the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_safe_mode")]
    pub safe_mode_default: bool,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub model_preset: Option<String>,
    #[serde(default)]
    pub user_profile: HashMap<String, String>,
}

fn default_safe_mode() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            safe_mode_default: true,
            api_endpoint: None,
            model_preset: None,
            user_profile: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let settings = AppSettings::default();
        assert!(settings.safe_mode_default);
        assert!(settings.api_endpoint.is_none());
        assert!(settings.model_preset.is_none());
        assert!(settings.user_profile.is_empty());
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.safe_mode_default);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut settings = AppSettings::default();
        settings.safe_mode_default = false;
        settings.model_preset = Some("gemma3:12b".to_string());
        settings
            .user_profile
            .insert("nickname".to_string(), "Sam".to_string());

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert!(!parsed.safe_mode_default);
        assert_eq!(parsed.model_preset.as_deref(), Some("gemma3:12b"));
        assert_eq!(parsed.user_profile.get("nickname").map(String::as_str), Some("Sam"));
    }
}
