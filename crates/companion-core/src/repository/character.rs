//! CharacterRepository trait definition.

use companion_types::character::{Character, CreateCharacterRequest};
use companion_types::error::RepositoryError;

/// Repository trait for character persistence.
///
/// Implementations live in companion-infra (e.g. `SqliteCharacterRepository`).
pub trait CharacterRepository: Send + Sync {
    /// Insert a new character, returning it with its assigned id.
    fn insert(
        &self,
        request: &CreateCharacterRequest,
    ) -> impl std::future::Future<Output = Result<Character, RepositoryError>> + Send;

    /// Get a character by id, or `None` if absent.
    fn get(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Character>, RepositoryError>> + Send;

    /// List all characters, ordered by id.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Character>, RepositoryError>> + Send;
}
