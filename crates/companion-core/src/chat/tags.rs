//! Emotion/action tag extraction from model replies.
//!
//! The prompt asks the model to close its reply with `<emotion=...>` and
//! optionally `<action=...>` tags, but models place them anywhere; the
//! parser is position-independent. Matching is case-sensitive and
//! first-match-wins.

use regex::Regex;

use std::sync::LazyLock;

static EMOTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<emotion=([^>]+)>").expect("emotion pattern"));
static ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<action=([^>]+)>").expect("action pattern"));
static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<emotion=[^>]+>|<action=[^>]+>").expect("strip pattern"));

/// A model reply split into clean text and extracted tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Input with all tags removed and leading/trailing whitespace trimmed.
    pub content: String,
    pub emotion: Option<String>,
    pub action: Option<String>,
}

/// Extract the first emotion and action tags from `raw` and strip all tag
/// occurrences from the returned content. Internal whitespace is
/// preserved; only the trim boundaries collapse.
pub fn parse_tags(raw: &str) -> ParsedReply {
    let emotion = EMOTION_RE
        .captures(raw)
        .map(|captures| captures[1].to_string());
    let action = ACTION_RE
        .captures(raw)
        .map(|captures| captures[1].to_string());
    let content = STRIP_RE.replace_all(raw, "").trim().to_string();

    ParsedReply {
        content,
        emotion,
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_and_action_extracted() {
        let parsed = parse_tags("hi <emotion=happy> there <action=wave>");
        assert_eq!(parsed.content, "hi  there");
        assert_eq!(parsed.emotion.as_deref(), Some("happy"));
        assert_eq!(parsed.action.as_deref(), Some("wave"));
    }

    #[test]
    fn test_no_tags_passes_through() {
        let parsed = parse_tags("no tags here");
        assert_eq!(parsed.content, "no tags here");
        assert!(parsed.emotion.is_none());
        assert!(parsed.action.is_none());
    }

    #[test]
    fn test_trailing_tag_trimmed() {
        let parsed = parse_tags("See you soon! <emotion=flirty>");
        assert_eq!(parsed.content, "See you soon!");
        assert_eq!(parsed.emotion.as_deref(), Some("flirty"));
        assert!(parsed.action.is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let parsed = parse_tags("<emotion=sad> oh <emotion=happy>");
        assert_eq!(parsed.emotion.as_deref(), Some("sad"));
        assert_eq!(parsed.content, "oh");
    }

    #[test]
    fn test_case_sensitive() {
        let parsed = parse_tags("hello <EMOTION=happy>");
        assert!(parsed.emotion.is_none());
        assert_eq!(parsed.content, "hello <EMOTION=happy>");
    }

    #[test]
    fn test_tag_mid_sentence() {
        let parsed = parse_tags("I <action=hug> missed you");
        assert_eq!(parsed.action.as_deref(), Some("hug"));
        assert_eq!(parsed.content, "I  missed you");
    }

    #[test]
    fn test_value_may_contain_spaces() {
        let parsed = parse_tags("bye <action=waves goodbye>");
        assert_eq!(parsed.action.as_deref(), Some("waves goodbye"));
    }

    #[test]
    fn test_unclosed_tag_left_alone() {
        let parsed = parse_tags("hmm <emotion=happy");
        assert!(parsed.emotion.is_none());
        assert_eq!(parsed.content, "hmm <emotion=happy");
    }
}
