//! Global settings service.

use companion_types::error::RepositoryError;
use companion_types::settings::AppSettings;
use tracing::info;

use crate::repository::SettingsRepository;

/// Read/update operations over the single global settings row.
pub struct SettingsService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Get the settings, creating the defaults row on first read.
    pub async fn get(&self) -> Result<AppSettings, RepositoryError> {
        self.repo.get_or_init().await
    }

    /// Replace the settings row.
    pub async fn update(&self, settings: AppSettings) -> Result<AppSettings, RepositoryError> {
        let stored = self.repo.update(&settings).await?;
        info!(
            safe_mode_default = stored.safe_mode_default,
            "settings updated"
        );
        Ok(stored)
    }
}
