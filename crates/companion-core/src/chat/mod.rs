//! Chat-turn orchestration: prompt composition, reply tag parsing, and
//! the turn state machine tying repositories and the generation client
//! together.

pub mod prompt;
pub mod service;
pub mod tags;

pub use service::{ChatRequest, ChatService, ChatTurn};
