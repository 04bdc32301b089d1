//! SQLite conversation and message repository implementation.
//!
//! Follows the same patterns as `SqliteCharacterRepository`: raw queries,
//! private Row structs, split reader/writer pool usage. Timestamps are
//! RFC 3339 TEXT.

use chrono::{DateTime, Utc};
use companion_core::repository::ConversationRepository;
use companion_types::conversation::Conversation;
use companion_types::error::RepositoryError;
use companion_types::message::{Message, MessageRole, NewMessage};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Conversation.
struct ConversationRow {
    id: i64,
    character_id: i64,
    last_safe_mode: i64,
    updated_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            character_id: row.try_get("character_id")?,
            last_safe_mode: row.try_get("last_safe_mode")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        Ok(Conversation {
            id: self.id,
            character_id: self.character_id,
            last_safe_mode: self.last_safe_mode != 0,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: i64,
    conversation_id: i64,
    role: String,
    content: String,
    is_action: i64,
    emotion: Option<String>,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            is_action: row.try_get("is_action")?,
            emotion: row.try_get("emotion")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Message {
            id: self.id,
            conversation_id: self.conversation_id,
            role,
            content: self.content,
            is_action: self.is_action != 0,
            emotion: self.emotion,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ConversationRepository for SqliteConversationRepository {
    async fn create_conversation(
        &self,
        character_id: i64,
        safe_mode: bool,
    ) -> Result<Conversation, RepositoryError> {
        let updated_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO conversations (character_id, last_safe_mode, updated_at) VALUES (?, ?, ?)",
        )
        .bind(character_id)
        .bind(safe_mode as i64)
        .bind(format_datetime(&updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Conversation {
            id: result.last_insert_rowid(),
            character_id,
            last_safe_mode: safe_mode,
            updated_at,
        })
    }

    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM conversations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let conversation_row = ConversationRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(conversation_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM conversations ORDER BY updated_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                ConversationRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_conversation()
            })
            .collect()
    }

    async fn update_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE conversations SET last_safe_mode = ?, updated_at = ? WHERE id = ?",
        )
        .bind(conversation.last_safe_mode as i64)
        .bind(format_datetime(&conversation.updated_at))
        .bind(conversation.id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO messages (conversation_id, role, content, is_action, emotion, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.conversation_id)
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(message.is_action as i64)
        .bind(&message.emotion)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Message {
            id: result.last_insert_rowid(),
            conversation_id: message.conversation_id,
            role: message.role,
            content: message.content.clone(),
            is_action: message.is_action,
            emotion: message.emotion.clone(),
            created_at,
        })
    }

    async fn get_messages(&self, conversation_id: i64) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM messages WHERE conversation_id = ? ORDER BY id")
            .bind(conversation_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_message()
            })
            .collect()
    }
}
