//! Conversation listing and history handlers.

use axum::Json;
use axum::extract::{Path, State};

use companion_core::repository::ConversationRepository;
use companion_types::conversation::Conversation;
use companion_types::message::Message;

use crate::http::error::AppError;
use crate::http::handlers::request_context;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/conversations - List all conversations.
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Conversation>>>, AppError> {
    let (start, request_id) = request_context();

    let conversations = state
        .chat_service
        .conversation_repo()
        .list_conversations()
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        conversations,
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/conversations/{id}/messages - Full message history.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let (start, request_id) = request_context();

    let messages = state.chat_service.messages(id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(messages, request_id, elapsed)))
}
