use std::sync::Arc;

use quiz_core::model::ResultsRecord;
use storage::keys;
use storage::repository::KeyValueStore;
use tracing::warn;

use crate::error::ResultsServiceError;

/// Persists the record of the most recently completed quiz.
#[derive(Clone)]
pub struct ResultsService {
    kv: Arc<dyn KeyValueStore>,
}

impl ResultsService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The stored record, if one exists and parses.
    ///
    /// A corrupt record is logged and treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `ResultsServiceError` on storage failures.
    pub async fn stored(&self) -> Result<Option<ResultsRecord>, ResultsServiceError> {
        let Some(raw) = self.kv.get(keys::RESULTS).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<ResultsRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(error = %err, "ignoring corrupt persisted results record");
                Ok(None)
            }
        }
    }

    /// The stored record, or an empty one if nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns `ResultsServiceError` on storage failures.
    pub async fn load(&self) -> Result<ResultsRecord, ResultsServiceError> {
        Ok(self.stored().await?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `ResultsServiceError` if encoding or storage fails.
    pub async fn save(&self, record: &ResultsRecord) -> Result<(), ResultsServiceError> {
        let json = serde_json::to_string(record)?;
        self.kv.set(keys::RESULTS, &json).await?;
        Ok(())
    }

    /// Forget the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ResultsServiceError` on storage failures.
    pub async fn clear(&self) -> Result<(), ResultsServiceError> {
        self.kv.remove(keys::RESULTS).await?;
        Ok(())
    }
}
