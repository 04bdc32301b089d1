//! Generation prompt builder.
//!
//! Assembles the prompt for one chat turn from the character's persona,
//! the safe-mode flag, a bounded window of recent history, and the user
//! message. Pure string construction: identical inputs yield identical
//! output.
//!
//! Layout (clauses separated by blank lines, fixed order):
//! ```text
//! You are {name}. Gender: ... Age: ... Tone: ... {bio} {description}
//! Boundaries: ...
//! Safe mode ON/OFF: ...
//! Recent conversation: ...        (omitted when history is empty)
//! User: {message}
//! Reply as {name} ... <emotion=...> instruction
//! ```

use companion_types::character::Character;
use companion_types::message::{Message, MessageRole};

/// Emotion labels the model may close its reply with.
pub const EMOTIONS: [&str; 7] = ["happy", "sad", "angry", "shy", "sleepy", "flirty", "neutral"];

/// How the user is named in the history and message clauses.
const USER_LABEL: &str = "User";

/// Only the most recent messages are included in the history clause.
const HISTORY_WINDOW: usize = 6;

/// Builds the generation prompt for a chat turn.
pub struct PromptComposer;

impl PromptComposer {
    /// Compose the full prompt. Deterministic; no truncation of
    /// individual fields beyond the history window.
    pub fn compose(
        character: &Character,
        user_message: &str,
        safe_mode: bool,
        history: &[Message],
    ) -> String {
        let mut sections = Vec::with_capacity(6);

        sections.push(Self::persona_clause(character));
        sections.push(Self::boundaries_clause(character));
        sections.push(Self::safety_clause(safe_mode));

        if !history.is_empty() {
            sections.push(Self::history_clause(character, history));
        }

        sections.push(format!("{USER_LABEL}: {user_message}"));
        sections.push(Self::instruction_clause(character));

        sections.join("\n\n")
    }

    fn persona_clause(character: &Character) -> String {
        let gender = character.gender.as_deref().unwrap_or("unspecified");
        let age = character
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "unspecified".to_string());
        let tone = character.tone.as_deref().unwrap_or("friendly");

        let mut persona = format!(
            "You are {}. Gender: {gender}. Age: {age}. Tone: {tone}.",
            character.name
        );
        if let Some(bio) = &character.bio {
            persona.push(' ');
            persona.push_str(bio);
        }
        if let Some(description) = &character.description {
            persona.push(' ');
            persona.push_str(description);
        }
        persona
    }

    fn boundaries_clause(character: &Character) -> String {
        if character.boundaries.is_empty() {
            "Boundaries: follow basic safety guidelines.".to_string()
        } else {
            format!("Boundaries: {}.", character.boundaries.join(", "))
        }
    }

    fn safety_clause(safe_mode: bool) -> String {
        if safe_mode {
            "Safe mode ON: avoid explicit content, steer clear of forbidden topics, and answer gently."
                .to_string()
        } else {
            "Safe mode OFF: you may answer more directly and intimately, but still respect the user's boundaries."
                .to_string()
        }
    }

    fn history_clause(character: &Character, history: &[Message]) -> String {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let lines: Vec<String> = history[start..]
            .iter()
            .map(|message| {
                let speaker = match message.role {
                    MessageRole::User => USER_LABEL,
                    MessageRole::Assistant => character.name.as_str(),
                };
                format!("{speaker}: {}", message.content)
            })
            .collect();
        format!("Recent conversation:\n{}", lines.join("\n"))
    }

    fn instruction_clause(character: &Character) -> String {
        format!(
            "Reply as {} in a natural, in-character voice, in 2-4 sentences. \
             Important: end your reply with an emotion tag in the form <emotion={}>. \
             If you perform an action, also append an <action=name> tag.",
            character.name,
            EMOTIONS.join("|"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn test_character() -> Character {
        Character {
            id: 1,
            name: "Luna".to_string(),
            gender: Some("female".to_string()),
            age: Some(22),
            bio: Some("A night-owl painter.".to_string()),
            description: None,
            tone: Some("playful".to_string()),
            hashtags: vec![],
            boundaries: vec!["politics".to_string(), "violence".to_string()],
            image_default: None,
            image_by_emotion: HashMap::new(),
        }
    }

    fn test_message(role: MessageRole, content: &str) -> Message {
        Message {
            id: 0,
            conversation_id: 1,
            role,
            content: content.to_string(),
            is_action: false,
            emotion: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let character = test_character();
        let history = vec![
            test_message(MessageRole::User, "hi"),
            test_message(MessageRole::Assistant, "hey!"),
        ];
        let a = PromptComposer::compose(&character, "how are you?", true, &history);
        let b = PromptComposer::compose(&character, "how are you?", true, &history);
        assert_eq!(a, b);
    }

    #[test]
    fn test_persona_includes_defaults_for_missing_fields() {
        let mut character = test_character();
        character.gender = None;
        character.age = None;
        character.tone = None;
        character.bio = None;

        let prompt = PromptComposer::compose(&character, "hi", true, &[]);
        assert!(prompt.contains("You are Luna."));
        assert!(prompt.contains("Gender: unspecified."));
        assert!(prompt.contains("Age: unspecified."));
        assert!(prompt.contains("Tone: friendly."));
    }

    #[test]
    fn test_persona_appends_bio_and_description() {
        let mut character = test_character();
        character.description = Some("She paints constellations.".to_string());

        let prompt = PromptComposer::compose(&character, "hi", true, &[]);
        assert!(prompt.contains("A night-owl painter. She paints constellations."));
    }

    #[test]
    fn test_boundaries_joined_with_commas() {
        let prompt = PromptComposer::compose(&test_character(), "hi", true, &[]);
        assert!(prompt.contains("Boundaries: politics, violence."));
    }

    #[test]
    fn test_boundaries_default_when_empty() {
        let mut character = test_character();
        character.boundaries.clear();
        let prompt = PromptComposer::compose(&character, "hi", true, &[]);
        assert!(prompt.contains("Boundaries: follow basic safety guidelines."));
    }

    #[test]
    fn test_safety_clause_wording() {
        let on = PromptComposer::compose(&test_character(), "hi", true, &[]);
        let off = PromptComposer::compose(&test_character(), "hi", false, &[]);
        assert!(on.contains("Safe mode ON"));
        assert!(!on.contains("Safe mode OFF"));
        assert!(off.contains("Safe mode OFF"));
    }

    #[test]
    fn test_history_omitted_when_empty() {
        let prompt = PromptComposer::compose(&test_character(), "hi", true, &[]);
        assert!(!prompt.contains("Recent conversation:"));
    }

    #[test]
    fn test_history_windowed_to_last_six_in_order() {
        let character = test_character();
        let history: Vec<Message> = (0..10)
            .map(|i| test_message(MessageRole::User, &format!("message {i}")))
            .collect();

        let prompt = PromptComposer::compose(&character, "hi", true, &history);
        for i in 0..4 {
            assert!(!prompt.contains(&format!("message {i}")), "message {i} should be dropped");
        }
        for i in 4..10 {
            assert!(prompt.contains(&format!("message {i}")), "message {i} should be kept");
        }
        // Original order preserved.
        let pos4 = prompt.find("message 4").unwrap();
        let pos9 = prompt.find("message 9").unwrap();
        assert!(pos4 < pos9);
    }

    #[test]
    fn test_history_speaker_labels() {
        let character = test_character();
        let history = vec![
            test_message(MessageRole::User, "hello there"),
            test_message(MessageRole::Assistant, "hi, welcome back"),
        ];
        let prompt = PromptComposer::compose(&character, "hi", true, &history);
        assert!(prompt.contains("User: hello there"));
        assert!(prompt.contains("Luna: hi, welcome back"));
    }

    #[test]
    fn test_instruction_lists_all_emotions() {
        let prompt = PromptComposer::compose(&test_character(), "hi", true, &[]);
        assert!(prompt.contains("<emotion=happy|sad|angry|shy|sleepy|flirty|neutral>"));
        assert!(prompt.contains("2-4 sentences"));
    }

    #[test]
    fn test_user_message_is_literal() {
        let prompt =
            PromptComposer::compose(&test_character(), "*waves* got <weird> input", true, &[]);
        assert!(prompt.contains("User: *waves* got <weird> input"));
    }
}
