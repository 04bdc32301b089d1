//! SQLite implementations of the companion-core repository traits.

pub mod character;
pub mod conversation;
pub mod pool;
pub mod settings;

pub use character::SqliteCharacterRepository;
pub use conversation::SqliteConversationRepository;
pub use pool::DatabasePool;
pub use settings::SqliteSettingsRepository;
