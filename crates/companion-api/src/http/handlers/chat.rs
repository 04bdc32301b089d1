//! Chat-turn handler.

use axum::Json;
use axum::extract::State;

use companion_core::chat::{ChatRequest, ChatTurn};

use crate::http::error::AppError;
use crate::http::handlers::request_context;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/chat - Run one chat turn.
///
/// Generation failures never surface here; the client folds them into a
/// fallback reply, so the only error paths are unknown ids and storage.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatTurn>>, AppError> {
    let (start, request_id) = request_context();

    let turn = state.chat_service.chat(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(turn, request_id, elapsed)))
}
