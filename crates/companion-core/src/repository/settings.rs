//! SettingsRepository trait definition.

use companion_types::error::RepositoryError;
use companion_types::settings::AppSettings;

/// Repository trait for the single global settings row.
pub trait SettingsRepository: Send + Sync {
    /// Get the settings row, inserting the defaults first if it does not
    /// exist yet.
    fn get_or_init(
        &self,
    ) -> impl std::future::Future<Output = Result<AppSettings, RepositoryError>> + Send;

    /// Replace the settings row, creating it if absent. Returns the
    /// stored value.
    fn update(
        &self,
        settings: &AppSettings,
    ) -> impl std::future::Future<Output = Result<AppSettings, RepositoryError>> + Send;
}
