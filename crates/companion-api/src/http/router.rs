//! Axum router configuration with middleware.
//!
//! All API routes are under `/api/v1/`; health checks sit at the root.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Characters
        .route("/characters", post(handlers::character::create_character))
        .route("/characters", get(handlers::character::list_characters))
        .route("/characters/{id}", get(handlers::character::get_character))
        // Chat
        .route("/chat", post(handlers::chat::chat))
        // Conversations
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations),
        )
        .route(
            "/conversations/{id}/messages",
            get(handlers::conversation::get_messages),
        )
        // Settings
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health::health))
        .route(
            "/health/generation",
            get(handlers::health::generation_health),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
