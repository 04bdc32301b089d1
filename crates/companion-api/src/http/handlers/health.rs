//! Health-check handlers.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::http::handlers::request_context;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /health - Liveness check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Report of a generation-server probe.
#[derive(Debug, Serialize)]
pub struct GenerationHealth {
    pub status: &'static str,
    pub host: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health/generation - Send a short test prompt to the generation
/// server and report the outcome. Never an HTTP error: a dead server is
/// reported as `"status": "unreachable"` in the body.
pub async fn generation_health(State(state): State<AppState>) -> Json<ApiResponse<GenerationHealth>> {
    let (start, request_id) = request_context();

    let report = match state.generation.probe().await {
        Ok(_) => GenerationHealth {
            status: "ok",
            host: state.generation.host().to_string(),
            model: state.generation.model().to_string(),
            error: None,
        },
        Err(e) => GenerationHealth {
            status: "unreachable",
            host: state.generation.host().to_string(),
            model: state.generation.model().to_string(),
            error: Some(e.to_string()),
        },
    };
    let elapsed = start.elapsed().as_millis() as u64;

    Json(ApiResponse::success(report, request_id, elapsed))
}
