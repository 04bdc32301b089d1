use thiserror::Error;

/// Errors from repository operations (used by trait definitions in companion-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors related to character operations.
#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("character not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for CharacterError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => CharacterError::NotFound,
            other => CharacterError::Storage(other.to_string()),
        }
    }
}

/// Errors from a chat turn.
///
/// Generation failures are absorbed inside the generation client and never
/// appear here; only missing entities and storage failures surface.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("character not found")]
    CharacterNotFound,

    #[error("conversation not found")]
    ConversationNotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        ChatError::Storage(e.to_string())
    }
}

/// Internal classification of generation call failures.
///
/// Never crosses the generation client's boundary; used to pick the
/// user-facing fallback string and to decide whether to retry.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_not_found_maps_to_character_not_found() {
        let err: CharacterError = RepositoryError::NotFound.into();
        assert!(matches!(err, CharacterError::NotFound));
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }
}
