//! Character persona handlers.

use axum::Json;
use axum::extract::{Path, State};

use companion_types::character::{Character, CreateCharacterRequest};

use crate::http::error::AppError;
use crate::http::handlers::request_context;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/characters - Create a new character.
pub async fn create_character(
    State(state): State<AppState>,
    Json(body): Json<CreateCharacterRequest>,
) -> Result<Json<ApiResponse<Character>>, AppError> {
    let (start, request_id) = request_context();

    let character = state.character_service.create(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(character, request_id, elapsed)))
}

/// GET /api/v1/characters - List all characters.
pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Character>>>, AppError> {
    let (start, request_id) = request_context();

    let characters = state.character_service.list().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(characters, request_id, elapsed)))
}

/// GET /api/v1/characters/{id} - Get a character by id.
pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Character>>, AppError> {
    let (start, request_id) = request_context();

    let character = state.character_service.get(id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(character, request_id, elapsed)))
}
