use std::{path::PathBuf, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::config::{Config, merge_stored};

use super::{FileStorage, MemoryStorage, SettingsStorage, StorageError};

/// Storage key the whole settings record is persisted under.
pub const SETTINGS_KEY: &str = "worldClockConfig";

/// Loads and persists the settings record as one unit.
///
/// Cloning is cheap and every clone shares the same backend, so saves can
/// be moved into spawned tasks.
#[derive(Clone)]
pub struct ConfigStore {
    storage: Arc<dyn SettingsStorage>,
}

impl ConfigStore {
    /// A store over an arbitrary backend.
    pub fn new(storage: Arc<dyn SettingsStorage>) -> Self {
        Self { storage }
    }

    /// A store persisting to the JSON file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(path)))
    }

    /// A store that keeps settings in memory only.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// The backend this store writes to.
    pub fn storage(&self) -> &Arc<dyn SettingsStorage> {
        &self.storage
    }

    /// Reads the stored settings and merges them over the defaults.
    ///
    /// Never fails: an unreadable or missing record yields the defaults, and
    /// fields that do not validate fall back individually.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Config {
        match self.storage.read(SETTINGS_KEY).await {
            Ok(Some(stored)) => {
                let config = merge_stored(&stored);
                debug!(timezones = config.additional_timezones.len(), "Loaded settings");
                config
            }
            Ok(None) => {
                debug!("No stored settings, using defaults");
                Config::default()
            }
            Err(e) => {
                warn!(error = %e, "Cannot read stored settings, using defaults");
                Config::default()
            }
        }
    }

    /// Persists the full record, replacing whatever was stored before.
    ///
    /// # Errors
    /// Returns a `StorageError` if the record cannot be serialised or the
    /// backend rejects the write. Nothing is retried.
    #[instrument(skip_all)]
    pub async fn save(&self, config: &Config) -> Result<(), StorageError> {
        let value =
            serde_json::to_value(config).map_err(|e| StorageError::SerializationFailed {
                content_type: String::from("settings"),
                details: e.to_string(),
            })?;

        self.storage.write(SETTINGS_KEY, value).await?;
        debug!("Saved settings");
        Ok(())
    }
}
