//! Unit tests for config_store module
//!
//! In-memory backend plus a scratch directory for the file backend.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::json;

use crate::{
    config::{Config, DateFormat, TimeFormat},
    config_store::{
        ConfigStore, FileStorage, MemoryStorage, SETTINGS_KEY, SettingsStorage, StorageError,
    },
};

fn custom_config() -> Config {
    Config {
        background_color: String::from("#000"),
        font_color: String::from("#00FF00"),
        font_family: String::from("Georgia, serif"),
        font_size: 24,
        time_format: TimeFormat::Hour12,
        date_format: DateFormat::Short,
        additional_timezones: vec![String::from("Asia/Tokyo"), String::from("Europe/Paris")],
    }
}

#[tokio::test]
async fn load_without_stored_record_gives_defaults() {
    let store = ConfigStore::memory();

    assert_eq!(store.load().await, Config::default());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let store = ConfigStore::memory();
    let config = custom_config();

    store.save(&config).await.unwrap();

    assert_eq!(store.load().await, config);
}

#[tokio::test]
async fn save_writes_full_record_under_settings_key() {
    let storage = Arc::new(MemoryStorage::new());
    let store = ConfigStore::new(storage.clone());

    store.save(&Config::default()).await.unwrap();

    let stored = storage.get(SETTINGS_KEY).unwrap();
    assert_eq!(stored["backgroundColor"], "#1a1a2e");
    assert_eq!(stored["fontSize"], 16);
    assert_eq!(stored["additionalTimezones"], json!([]));
    assert_eq!(storage.writes(), 1);
}

#[tokio::test]
async fn partial_record_is_merged_over_defaults() {
    let storage = MemoryStorage::with_value(
        SETTINGS_KEY,
        json!({ "fontSize": 30, "timeFormat": "12", "theme": "dark" }),
    );
    let store = ConfigStore::new(Arc::new(storage));

    let config = store.load().await;

    assert_eq!(config.font_size, 30);
    assert_eq!(config.time_format, TimeFormat::Hour12);
    assert_eq!(config.background_color, "#1a1a2e");
    assert_eq!(config.date_format, DateFormat::Long);
}

#[tokio::test]
async fn invalid_fields_fall_back_individually() {
    let storage = MemoryStorage::with_value(
        SETTINGS_KEY,
        json!({
            "backgroundColor": "red",
            "fontSize": 99,
            "dateFormat": "full",
            "fontColor": "#abc",
            "additionalTimezones": ["Asia/Tokyo", "Asia/Tokyo", "../../etc/passwd"]
        }),
    );
    let store = ConfigStore::new(Arc::new(storage));

    let config = store.load().await;

    assert_eq!(config.background_color, "#1a1a2e");
    assert_eq!(config.font_size, 16);
    assert_eq!(config.date_format, DateFormat::Long);
    assert_eq!(config.font_color, "#abc");
    assert_eq!(config.additional_timezones, ["Asia/Tokyo", "//etc/passwd"]);
}

#[tokio::test]
async fn legacy_background_key_is_accepted() {
    let storage = MemoryStorage::with_value(SETTINGS_KEY, json!({ "bgColor": "#123456" }));
    let store = ConfigStore::new(Arc::new(storage));

    assert_eq!(store.load().await.background_color, "#123456");
}

#[tokio::test]
async fn read_failure_yields_defaults() {
    let storage = MemoryStorage::with_value(SETTINGS_KEY, json!({ "fontSize": 30 }));
    storage.set_fail_reads(true);
    let store = ConfigStore::new(Arc::new(storage));

    assert_eq!(store.load().await, Config::default());
}

#[tokio::test]
async fn write_failure_is_reported() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_fail_writes(true);
    let store = ConfigStore::new(storage.clone());

    let result = store.save(&Config::default()).await;

    assert!(matches!(result, Err(StorageError::Unavailable(_))));
    assert!(storage.get(SETTINGS_KEY).is_none());
}

#[tokio::test]
async fn file_storage_missing_file_reads_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("settings.json"));

    assert_eq!(storage.read(SETTINGS_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn file_storage_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let storage = FileStorage::new(&path);

    storage.write("other", json!(1)).await.unwrap();
    storage.write(SETTINGS_KEY, json!({ "fontSize": 20 })).await.unwrap();

    assert_eq!(storage.read("other").await.unwrap(), Some(json!(1)));
    assert_eq!(
        storage.read(SETTINGS_KEY).await.unwrap(),
        Some(json!({ "fontSize": 20 }))
    );
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn file_storage_rejects_non_object_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    let storage = FileStorage::new(&path);

    let result = storage.read(SETTINGS_KEY).await;
    assert!(matches!(result, Err(StorageError::ParseFailed { .. })));

    storage.write(SETTINGS_KEY, json!({})).await.unwrap();
    assert_eq!(storage.read(SETTINGS_KEY).await.unwrap(), Some(json!({})));
}

#[tokio::test]
async fn corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = ConfigStore::file(&path);

    assert_eq!(store.load().await, Config::default());
}
