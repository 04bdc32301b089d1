//! Conversation thread type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat thread tied to exactly one character.
///
/// Created lazily on the first chat turn when the caller supplies no
/// conversation id. `last_safe_mode` records the safe-mode flag of the
/// most recent turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub character_id: i64,
    pub last_safe_mode: bool,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_serialize() {
        let conversation = Conversation {
            id: 7,
            character_id: 3,
            last_safe_mode: true,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&conversation).unwrap();
        assert!(json.contains("\"character_id\":3"));
        assert!(json.contains("\"last_safe_mode\":true"));
    }
}
