//! Repository trait definitions ("ports").
//!
//! Implementations live in companion-infra. Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).

pub mod character;
pub mod conversation;
pub mod settings;

pub use character::CharacterRepository;
pub use conversation::ConversationRepository;
pub use settings::SettingsRepository;
