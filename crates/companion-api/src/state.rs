//! Application state wiring all services together.
//!
//! Services are generic over repository/client traits, but AppState pins
//! them to the concrete infra implementations.

use std::sync::Arc;

use companion_core::chat::service::ChatService;
use companion_core::service::character::CharacterService;
use companion_core::service::settings::SettingsService;
use companion_infra::ollama::OllamaClient;
use companion_infra::sqlite::character::SqliteCharacterRepository;
use companion_infra::sqlite::conversation::SqliteConversationRepository;
use companion_infra::sqlite::pool::DatabasePool;
use companion_infra::sqlite::settings::SqliteSettingsRepository;
use companion_types::config::GenerationConfig;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteChatService =
    ChatService<SqliteCharacterRepository, SqliteConversationRepository, OllamaClient>;

pub type ConcreteCharacterService = CharacterService<SqliteCharacterRepository>;

pub type ConcreteSettingsService = SettingsService<SqliteSettingsRepository>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub character_service: Arc<ConcreteCharacterService>,
    pub settings_service: Arc<ConcreteSettingsService>,
    /// Separate client for the generation health probe (the chat service
    /// owns its own instance).
    pub generation: Arc<OllamaClient>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, run
    /// migrations, wire services.
    pub async fn init(database_url: &str, generation: GenerationConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(database_url).await?;

        let chat_service = ChatService::new(
            SqliteCharacterRepository::new(db_pool.clone()),
            SqliteConversationRepository::new(db_pool.clone()),
            OllamaClient::new(&generation),
        );

        let character_service =
            CharacterService::new(SqliteCharacterRepository::new(db_pool.clone()));
        let settings_service =
            SettingsService::new(SqliteSettingsRepository::new(db_pool.clone()));

        Ok(Self {
            chat_service: Arc::new(chat_service),
            character_service: Arc::new(character_service),
            settings_service: Arc::new(settings_service),
            generation: Arc::new(OllamaClient::new(&generation)),
            db_pool,
        })
    }
}
