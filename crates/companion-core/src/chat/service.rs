//! Chat-turn orchestrator.
//!
//! One turn: resolve the character, load or create the conversation,
//! persist the user message, compose the prompt, call the generation
//! client, parse tags out of the reply, persist the assistant message,
//! and stamp the conversation.
//!
//! There is no rollback: if the assistant write fails, the user message
//! stays committed. Generation failures never reach this layer -- the
//! client converts them into an in-band fallback reply.

use chrono::Utc;
use companion_types::error::ChatError;
use companion_types::message::{Message, MessageRole, NewMessage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chat::prompt::PromptComposer;
use crate::chat::tags::parse_tags;
use crate::generation::GenerationClient;
use crate::repository::{CharacterRepository, ConversationRepository};

/// One chat request from a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub character_id: i64,
    #[serde(default)]
    pub conversation_id: Option<i64>,
    #[serde(default = "default_safe_mode")]
    pub safe_mode: bool,
    pub message: String,
    /// Optional model override for this turn.
    #[serde(default)]
    pub model: Option<String>,
}

fn default_safe_mode() -> bool {
    true
}

/// The result of one turn: the (possibly new) conversation id, the clean
/// reply, and the parsed tags.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub conversation_id: i64,
    pub reply: String,
    pub emotion: Option<String>,
    pub action: Option<String>,
}

/// Orchestrates one chat turn against the repositories and the
/// generation client.
///
/// Generic over the repository and client traits so tests can supply
/// in-memory fakes (companion-core never depends on companion-infra).
pub struct ChatService<C, V, G>
where
    C: CharacterRepository,
    V: ConversationRepository,
    G: GenerationClient,
{
    character_repo: C,
    conversation_repo: V,
    generation: G,
}

impl<C, V, G> ChatService<C, V, G>
where
    C: CharacterRepository,
    V: ConversationRepository,
    G: GenerationClient,
{
    pub fn new(character_repo: C, conversation_repo: V, generation: G) -> Self {
        Self {
            character_repo,
            conversation_repo,
            generation,
        }
    }

    /// Access the conversation repository (listing endpoints go through it).
    pub fn conversation_repo(&self) -> &V {
        &self.conversation_repo
    }

    /// Run one chat turn.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatTurn, ChatError> {
        let character = self
            .character_repo
            .get(request.character_id)
            .await?
            .ok_or(ChatError::CharacterNotFound)?;

        let (mut conversation, history) = match request.conversation_id {
            Some(conversation_id) => {
                let conversation = self
                    .conversation_repo
                    .get_conversation(conversation_id)
                    .await?
                    .ok_or(ChatError::ConversationNotFound)?;
                // A conversation belonging to another character is treated
                // the same as an unknown id.
                if conversation.character_id != character.id {
                    return Err(ChatError::ConversationNotFound);
                }
                let history = self.conversation_repo.get_messages(conversation_id).await?;
                (conversation, history)
            }
            None => {
                let conversation = self
                    .conversation_repo
                    .create_conversation(character.id, request.safe_mode)
                    .await?;
                info!(
                    conversation_id = conversation.id,
                    character_id = character.id,
                    "created conversation"
                );
                (conversation, Vec::new())
            }
        };

        self.conversation_repo
            .insert_message(&NewMessage {
                conversation_id: conversation.id,
                role: MessageRole::User,
                content: request.message.clone(),
                is_action: is_action_message(&request.message),
                emotion: None,
            })
            .await?;

        // History excludes the user message just written.
        let prompt =
            PromptComposer::compose(&character, &request.message, request.safe_mode, &history);
        debug!(
            conversation_id = conversation.id,
            prompt_len = prompt.len(),
            history_len = history.len(),
            "composed prompt"
        );

        let raw_reply = self
            .generation
            .generate(&prompt, request.model.as_deref())
            .await;
        let parsed = parse_tags(&raw_reply);

        self.conversation_repo
            .insert_message(&NewMessage {
                conversation_id: conversation.id,
                role: MessageRole::Assistant,
                content: parsed.content.clone(),
                is_action: parsed.action.is_some(),
                emotion: parsed.emotion.clone(),
            })
            .await?;

        conversation.last_safe_mode = request.safe_mode;
        conversation.updated_at = Utc::now();
        self.conversation_repo
            .update_conversation(&conversation)
            .await?;

        info!(
            conversation_id = conversation.id,
            emotion = parsed.emotion.as_deref().unwrap_or("none"),
            "chat turn completed"
        );

        Ok(ChatTurn {
            conversation_id: conversation.id,
            reply: parsed.content,
            emotion: parsed.emotion,
            action: parsed.action,
        })
    }

    /// Full message history of a conversation, NotFound if the
    /// conversation does not exist.
    pub async fn messages(&self, conversation_id: i64) -> Result<Vec<Message>, ChatError> {
        self.conversation_repo
            .get_conversation(conversation_id)
            .await?
            .ok_or(ChatError::ConversationNotFound)?;
        Ok(self.conversation_repo.get_messages(conversation_id).await?)
    }
}

/// A user message is a narrated action when the trimmed input both starts
/// and ends with `*`.
fn is_action_message(message: &str) -> bool {
    let trimmed = message.trim();
    trimmed.starts_with('*') && trimmed.ends_with('*')
}
