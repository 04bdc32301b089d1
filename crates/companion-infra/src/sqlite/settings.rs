//! SQLite settings repository implementation.
//!
//! The settings table holds a single row with fixed id 1, created with
//! defaults on first read.

use companion_core::repository::SettingsRepository;
use companion_types::error::RepositoryError;
use companion_types::settings::AppSettings;
use sqlx::Row;

use std::collections::HashMap;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SettingsRepository`.
pub struct SqliteSettingsRepository {
    pool: DatabasePool,
}

impl SqliteSettingsRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self) -> Result<Option<AppSettings>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM settings WHERE id = 1")
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let safe_mode_default: i64 = row
                    .try_get("safe_mode_default")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let api_endpoint: Option<String> = row
                    .try_get("api_endpoint")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let model_preset: Option<String> = row
                    .try_get("model_preset")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let user_profile_json: String = row
                    .try_get("user_profile")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let user_profile: HashMap<String, String> =
                    serde_json::from_str(&user_profile_json).map_err(|e| {
                        RepositoryError::Query(format!("invalid user_profile JSON: {e}"))
                    })?;

                Ok(Some(AppSettings {
                    safe_mode_default: safe_mode_default != 0,
                    api_endpoint,
                    model_preset,
                    user_profile,
                }))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, settings: &AppSettings) -> Result<(), RepositoryError> {
        let user_profile = serde_json::to_string(&settings.user_profile)
            .unwrap_or_else(|_| "{}".to_string());

        sqlx::query(
            r#"INSERT INTO settings (id, safe_mode_default, api_endpoint, model_preset, user_profile)
               VALUES (1, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   safe_mode_default = excluded.safe_mode_default,
                   api_endpoint = excluded.api_endpoint,
                   model_preset = excluded.model_preset,
                   user_profile = excluded.user_profile"#,
        )
        .bind(settings.safe_mode_default as i64)
        .bind(&settings.api_endpoint)
        .bind(&settings.model_preset)
        .bind(user_profile)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    async fn get_or_init(&self) -> Result<AppSettings, RepositoryError> {
        if let Some(settings) = self.fetch().await? {
            return Ok(settings);
        }
        let defaults = AppSettings::default();
        self.upsert(&defaults).await?;
        Ok(defaults)
    }

    async fn update(&self, settings: &AppSettings) -> Result<AppSettings, RepositoryError> {
        self.upsert(settings).await?;
        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_repo() -> (tempfile::TempDir, SqliteSettingsRepository) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteSettingsRepository::new(pool))
    }

    #[tokio::test]
    async fn test_first_read_creates_defaults() {
        let (_dir, repo) = make_repo().await;
        let settings = repo.get_or_init().await.unwrap();
        assert!(settings.safe_mode_default);
        assert!(settings.api_endpoint.is_none());

        // Second read returns the same row, not a new one.
        let again = repo.get_or_init().await.unwrap();
        assert!(again.safe_mode_default);
    }

    #[tokio::test]
    async fn test_update_persists() {
        let (_dir, repo) = make_repo().await;
        repo.get_or_init().await.unwrap();

        let mut settings = AppSettings::default();
        settings.safe_mode_default = false;
        settings.model_preset = Some("llama3.3".to_string());
        settings
            .user_profile
            .insert("nickname".to_string(), "Sam".to_string());
        repo.update(&settings).await.unwrap();

        let fetched = repo.get_or_init().await.unwrap();
        assert!(!fetched.safe_mode_default);
        assert_eq!(fetched.model_preset.as_deref(), Some("llama3.3"));
        assert_eq!(
            fetched.user_profile.get("nickname").map(String::as_str),
            Some("Sam")
        );
    }

    #[tokio::test]
    async fn test_update_without_prior_read_creates_row() {
        let (_dir, repo) = make_repo().await;
        let mut settings = AppSettings::default();
        settings.safe_mode_default = false;
        repo.update(&settings).await.unwrap();

        let fetched = repo.get_or_init().await.unwrap();
        assert!(!fetched.safe_mode_default);
    }
}
