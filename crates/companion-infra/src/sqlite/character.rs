//! SQLite character repository implementation.
//!
//! Implements `CharacterRepository` from `companion-core` using sqlx with
//! split read/write pools: raw queries, a private Row struct for
//! SQLite-to-domain mapping, JSON-encoded TEXT columns for the string
//! list/map fields.

use companion_core::repository::CharacterRepository;
use companion_types::character::{Character, CreateCharacterRequest};
use companion_types::error::RepositoryError;
use sqlx::Row;

use std::collections::HashMap;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CharacterRepository`.
pub struct SqliteCharacterRepository {
    pool: DatabasePool,
}

impl SqliteCharacterRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Character.
struct CharacterRow {
    id: i64,
    name: String,
    gender: Option<String>,
    age: Option<i64>,
    bio: Option<String>,
    description: Option<String>,
    tone: Option<String>,
    hashtags: String,
    boundaries: String,
    image_default: Option<String>,
    image_by_emotion: String,
}

impl CharacterRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            gender: row.try_get("gender")?,
            age: row.try_get("age")?,
            bio: row.try_get("bio")?,
            description: row.try_get("description")?,
            tone: row.try_get("tone")?,
            hashtags: row.try_get("hashtags")?,
            boundaries: row.try_get("boundaries")?,
            image_default: row.try_get("image_default")?,
            image_by_emotion: row.try_get("image_by_emotion")?,
        })
    }

    fn into_character(self) -> Result<Character, RepositoryError> {
        let hashtags: Vec<String> = parse_json_column(&self.hashtags, "hashtags")?;
        let boundaries: Vec<String> = parse_json_column(&self.boundaries, "boundaries")?;
        let image_by_emotion: HashMap<String, String> =
            parse_json_column(&self.image_by_emotion, "image_by_emotion")?;

        Ok(Character {
            id: self.id,
            name: self.name,
            gender: self.gender,
            age: self.age,
            bio: self.bio,
            description: self.description,
            tone: self.tone,
            hashtags,
            boundaries,
            image_default: self.image_default,
            image_by_emotion,
        })
    }
}

fn parse_json_column<T: serde::de::DeserializeOwned>(
    raw: &str,
    column: &str,
) -> Result<T, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::Query(format!("invalid {column} JSON: {e}")))
}

fn encode_json_column<T: serde::Serialize>(value: &T) -> String {
    // Vec<String> / HashMap<String, String> always serialize.
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

impl CharacterRepository for SqliteCharacterRepository {
    async fn insert(
        &self,
        request: &CreateCharacterRequest,
    ) -> Result<Character, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO characters (name, gender, age, bio, description, tone, hashtags, boundaries, image_default, image_by_emotion)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&request.name)
        .bind(&request.gender)
        .bind(request.age)
        .bind(&request.bio)
        .bind(&request.description)
        .bind(&request.tone)
        .bind(encode_json_column(&request.hashtags))
        .bind(encode_json_column(&request.boundaries))
        .bind(&request.image_default)
        .bind(encode_json_column(&request.image_by_emotion))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Character {
            id: result.last_insert_rowid(),
            name: request.name.clone(),
            gender: request.gender.clone(),
            age: request.age,
            bio: request.bio.clone(),
            description: request.description.clone(),
            tone: request.tone.clone(),
            hashtags: request.hashtags.clone(),
            boundaries: request.boundaries.clone(),
            image_default: request.image_default.clone(),
            image_by_emotion: request.image_by_emotion.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Character>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM characters WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let character_row = CharacterRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(character_row.into_character()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Character>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM characters ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                CharacterRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_character()
            })
            .collect()
    }
}
