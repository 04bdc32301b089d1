//! Character persona types.
//!
//! A character is the persona whose attributes condition generation:
//! name, optional descriptive fields, boundary topics to avoid, and
//! image references keyed by emotion label.

use serde::{Deserialize, Serialize};

use std::collections::HashMap;

/// A character persona.
///
/// `boundaries` lists topics the character must avoid; `image_by_emotion`
/// maps emotion labels (e.g. "happy") to image references so a client can
/// swap portraits per reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub bio: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub hashtags: Vec<String>,
    pub boundaries: Vec<String>,
    pub image_default: Option<String>,
    pub image_by_emotion: HashMap<String, String>,
}

/// Payload for creating a character. Only `name` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub boundaries: Vec<String>,
    #[serde(default)]
    pub image_default: Option<String>,
    #[serde(default)]
    pub image_by_emotion: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_minimal_json() {
        let req: CreateCharacterRequest =
            serde_json::from_str(r#"{"name": "Luna"}"#).unwrap();
        assert_eq!(req.name, "Luna");
        assert!(req.gender.is_none());
        assert!(req.hashtags.is_empty());
        assert!(req.boundaries.is_empty());
        assert!(req.image_by_emotion.is_empty());
    }

    #[test]
    fn test_create_request_full_json() {
        let req: CreateCharacterRequest = serde_json::from_str(
            r#"{
                "name": "Luna",
                "gender": "female",
                "age": 22,
                "tone": "playful",
                "boundaries": ["politics"],
                "image_by_emotion": {"happy": "luna_happy.png"}
            }"#,
        )
        .unwrap();
        assert_eq!(req.age, Some(22));
        assert_eq!(req.boundaries, vec!["politics"]);
        assert_eq!(
            req.image_by_emotion.get("happy").map(String::as_str),
            Some("luna_happy.png")
        );
    }

    #[test]
    fn test_character_serde_roundtrip() {
        let character = Character {
            id: 1,
            name: "Luna".to_string(),
            gender: None,
            age: Some(22),
            bio: Some("A night-owl painter.".to_string()),
            description: None,
            tone: Some("playful".to_string()),
            hashtags: vec!["#art".to_string()],
            boundaries: vec![],
            image_default: None,
            image_by_emotion: HashMap::new(),
        };
        let json = serde_json::to_string(&character).unwrap();
        let parsed: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 1);
        assert_eq!(parsed.name, "Luna");
        assert_eq!(parsed.hashtags, vec!["#art"]);
    }
}
