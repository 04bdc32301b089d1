//! REST API request handlers.

pub mod character;
pub mod chat;
pub mod conversation;
pub mod health;
pub mod settings;

use std::time::Instant;

/// Per-request bookkeeping shared by all handlers.
pub(crate) fn request_context() -> (Instant, String) {
    (Instant::now(), uuid::Uuid::now_v7().to_string())
}
