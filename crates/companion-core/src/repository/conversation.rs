//! ConversationRepository trait definition.
//!
//! Covers both conversation records and the messages within them, the
//! two always being persisted through the same store.

use companion_types::conversation::Conversation;
use companion_types::error::RepositoryError;
use companion_types::message::{Message, NewMessage};

/// Repository trait for conversation and message persistence.
pub trait ConversationRepository: Send + Sync {
    /// Create a new conversation bound to a character, returning it with
    /// its assigned id.
    fn create_conversation(
        &self,
        character_id: i64,
        safe_mode: bool,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by id, or `None` if absent.
    fn get_conversation(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// List all conversations, most recently updated first.
    fn list_conversations(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// Update a conversation's `last_safe_mode` and `updated_at` in place.
    fn update_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a message, returning it with its assigned id and timestamp.
    fn insert_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Get all messages for a conversation in insertion order (id ASC).
    fn get_messages(
        &self,
        conversation_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;
}
