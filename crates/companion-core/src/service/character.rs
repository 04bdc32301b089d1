//! Character CRUD service.

use companion_types::character::{Character, CreateCharacterRequest};
use companion_types::error::CharacterError;
use tracing::info;

use crate::repository::CharacterRepository;

/// Create/read operations over character personas.
pub struct CharacterService<R: CharacterRepository> {
    repo: R,
}

impl<R: CharacterRepository> CharacterService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new character from the request payload.
    pub async fn create(
        &self,
        request: CreateCharacterRequest,
    ) -> Result<Character, CharacterError> {
        let character = self.repo.insert(&request).await?;
        info!(character_id = character.id, name = %character.name, "character created");
        Ok(character)
    }

    /// Get a character by id.
    pub async fn get(&self, id: i64) -> Result<Character, CharacterError> {
        self.repo.get(id).await?.ok_or(CharacterError::NotFound)
    }

    /// List all characters.
    pub async fn list(&self) -> Result<Vec<Character>, CharacterError> {
        Ok(self.repo.list().await?)
    }
}
