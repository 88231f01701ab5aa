use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Mutex, MutexGuard,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::StorageError;

/// Key/value persistence for the settings blob.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Reads the value stored under `key`, `None` if nothing was stored.
    ///
    /// # Errors
    /// Returns a `StorageError` if the backend cannot be read.
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a `StorageError` if the backend cannot be written.
    async fn write(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Stores every key in one JSON object file.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileStorage {
    /// Storage backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_object(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    details: e.to_string(),
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(_) => Err(StorageError::ParseFailed {
                location: self.path.display().to_string(),
                details: String::from("top-level value is not an object"),
            }),
            Err(e) => Err(StorageError::ParseFailed {
                location: self.path.display().to_string(),
                details: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl SettingsStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut object = self.read_object().await?;
        Ok(object.remove(key))
    }

    async fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut object = match self.read_object().await {
            Ok(object) => object,
            Err(StorageError::ParseFailed { location, details }) => {
                warn!(%location, %details, "Replacing unreadable settings file");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        object.insert(key.to_string(), value);

        let content = serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
            StorageError::SerializationFailed {
                content_type: String::from("settings"),
                details: e.to_string(),
            }
        })?;

        let write_failed = |e: std::io::Error| StorageError::WriteFailed {
            path: self.path.clone(),
            details: e.to_string(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(write_failed)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(write_failed)?;

        debug!(path = %self.path.display(), key, "Persisted settings");
        Ok(())
    }
}

/// Volatile storage for headless runs and tests.
///
/// Reads and writes can be made to fail, and writes can be slowed down, to
/// exercise error and loading paths.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, Value>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_delay: Mutex<Duration>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one value.
    pub fn with_value(key: &str, value: Value) -> Self {
        let storage = Self::new();
        storage.values().insert(key.to_string(), value);
        storage
    }

    /// Makes every read fail while `fail` is set.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every write fail while `fail` is set.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delays every write by `delay`.
    pub fn set_write_delay(&self, delay: Duration) {
        *self
            .write_delay
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = delay;
    }

    /// The value currently stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values().get(key).cloned()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SettingsStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(String::from("reads disabled")));
        }
        Ok(self.get(key))
    }

    async fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let delay = *self
            .write_delay
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(String::from("writes disabled")));
        }

        self.values().insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
