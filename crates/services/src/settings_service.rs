use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::keys;
use storage::repository::KeyValueStore;

use crate::error::SettingsServiceError;

/// Remembers the last-used difficulty and question count.
#[derive(Clone)]
pub struct SettingsService {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load persisted settings. Missing or unparseable values fall back to
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<QuizSettings, SettingsServiceError> {
        let difficulty = self.kv.get(keys::DIFFICULTY).await?;
        let amount = self.kv.get(keys::AMOUNT).await?;
        Ok(QuizSettings::from_stored(
            difficulty.as_deref(),
            amount.as_deref(),
        ))
    }

    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn save(&self, settings: QuizSettings) -> Result<(), SettingsServiceError> {
        self.kv
            .set(keys::DIFFICULTY, settings.difficulty.as_str())
            .await?;
        self.kv
            .set(keys::AMOUNT, &settings.amount.to_string())
            .await?;
        Ok(())
    }
}
