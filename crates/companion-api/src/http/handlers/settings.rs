//! Global settings handlers.

use axum::Json;
use axum::extract::State;

use companion_types::settings::AppSettings;

use crate::http::error::AppError;
use crate::http::handlers::request_context;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/settings - Get the global settings, creating defaults on
/// first read.
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AppSettings>>, AppError> {
    let (start, request_id) = request_context();

    let settings = state.settings_service.get().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(settings, request_id, elapsed)))
}

/// PUT /api/v1/settings - Replace the global settings.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<AppSettings>,
) -> Result<Json<ApiResponse<AppSettings>>, AppError> {
    let (start, request_id) = request_context();

    let settings = state.settings_service.update(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(settings, request_id, elapsed)))
}
