//! Application services wrapping the repository traits.

pub mod character;
pub mod settings;

pub use character::CharacterService;
pub use settings::SettingsService;
