//! Unit tests for the CLI module
//!
//! Tests command registry, formatting and every built-in command against an
//! in-memory settings store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use crate::{
    cli::{
        CliError, CliService, CommandRegistry, describe_clocks, formatting::format_json_value,
    },
    config::{Config, TimeFormat},
    config_store::{ConfigStore, MemoryStorage, SETTINGS_KEY},
    formatting::LocalZone,
};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn memory_service() -> (CliService, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let service = CliService::new(ConfigStore::new(storage.clone()));
    (service, storage)
}

#[test]
fn format_json_value_scalars() {
    assert_eq!(format_json_value(&json!("hello world")), "\"hello world\"");
    assert_eq!(format_json_value(&json!("")), "\"\"");
    assert_eq!(format_json_value(&json!(16)), "16");
    assert_eq!(format_json_value(&json!(-2.5)), "-2.5");
    assert_eq!(format_json_value(&json!(true)), "true");
    assert_eq!(format_json_value(&Value::Null), "null");
}

#[test]
fn format_json_value_collections() {
    assert_eq!(format_json_value(&json!([])), "[]");
    assert_eq!(
        format_json_value(&json!(["Asia/Tokyo", "UTC"])),
        "[\"Asia/Tokyo\", \"UTC\"]"
    );
    assert_eq!(format_json_value(&json!({"a": 1, "b": 2})), "{2}");
}

#[test]
fn empty_registry_has_no_categories() {
    let registry = CommandRegistry::new(ConfigStore::memory());

    assert!(registry.list_commands().is_empty());
    assert!(registry.category_metadata("config").is_none());
}

#[test]
fn all_commands_are_registered() {
    let (service, _) = memory_service();

    assert_eq!(
        service.list_all(),
        vec![
            ("clock".to_string(), args(&["show"])),
            (
                "config".to_string(),
                args(&["get", "reset", "schema", "set"])
            ),
            (
                "timezone".to_string(),
                args(&["add", "available", "list", "remove"])
            ),
        ]
    );
}

#[tokio::test]
async fn unknown_category_and_command_are_reported() {
    let (service, _) = memory_service();

    let result = service.execute_command("alarm", "set", &[]).await;
    assert!(matches!(result, Err(CliError::CommandNotFound(_))));

    let result = service.execute_command("config", "watch", &[]).await;
    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}

#[tokio::test]
async fn argument_counts_are_validated() {
    let (service, _) = memory_service();

    let result = service.execute_command("config", "set", &args(&["fontSize"])).await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));

    let result = service
        .execute_command("timezone", "list", &args(&["extra"]))
        .await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn get_reports_effective_values() {
    let (service, _) = memory_service();

    let output = service
        .execute_command("config", "get", &args(&["fontSize"]))
        .await
        .unwrap();
    assert_eq!(output, "fontSize: 16");

    let output = service
        .execute_command("config", "get", &args(&["timeFormat"]))
        .await
        .unwrap();
    assert_eq!(output, "timeFormat: \"24\"");

    let result = service
        .execute_command("config", "get", &args(&["colour"]))
        .await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn set_validates_and_persists() {
    let (service, storage) = memory_service();

    let output = service
        .execute_command("config", "set", &args(&["fontSize", "60"]))
        .await
        .unwrap();
    assert_eq!(output, "Set fontSize to '16' (requested '60')");

    let output = service
        .execute_command("config", "set", &args(&["backgroundColor", "#000"]))
        .await
        .unwrap();
    assert_eq!(output, "Set backgroundColor to '#000'");

    let stored = storage.get(SETTINGS_KEY).unwrap();
    assert_eq!(stored["fontSize"], json!(16));
    assert_eq!(stored["backgroundColor"], json!("#000"));
}

#[tokio::test]
async fn set_font_size_reads_leading_number() {
    let (service, storage) = memory_service();

    let output = service
        .execute_command("config", "set", &args(&["fontSize", "20px"]))
        .await
        .unwrap();
    assert_eq!(output, "Set fontSize to '20' (requested '20px')");

    let stored = storage.get(SETTINGS_KEY).unwrap();
    assert_eq!(stored["fontSize"], json!(20));
}

#[tokio::test]
async fn set_keeps_previous_colour_on_invalid_input() {
    let (service, storage) = memory_service();

    let output = service
        .execute_command("config", "set", &args(&["fontColor", "red"]))
        .await
        .unwrap();

    assert_eq!(output, "Set fontColor to '#ffffff' (requested 'red')");
    assert_eq!(storage.get(SETTINGS_KEY).unwrap()["fontColor"], json!("#ffffff"));
}

#[tokio::test]
async fn set_rejects_unknown_field() {
    let (service, storage) = memory_service();

    let result = service
        .execute_command("config", "set", &args(&["theme", "dark"]))
        .await;

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
    assert_eq!(storage.writes(), 0);
}

#[tokio::test]
async fn set_reports_write_failure() {
    let (service, storage) = memory_service();
    storage.set_fail_writes(true);

    let result = service
        .execute_command("config", "set", &args(&["fontSize", "20"]))
        .await;

    assert!(matches!(result, Err(CliError::Storage(_))));
}

#[tokio::test]
async fn reset_stores_defaults() {
    let storage = Arc::new(MemoryStorage::with_value(
        SETTINGS_KEY,
        json!({"fontSize": 30, "additionalTimezones": ["UTC"]}),
    ));
    let service = CliService::new(ConfigStore::new(storage.clone()));

    let output = service.execute_command("config", "reset", &[]).await.unwrap();

    assert_eq!(output, "Settings reset to default!");
    let stored = storage.get(SETTINGS_KEY).unwrap();
    assert_eq!(stored, serde_json::to_value(Config::default()).unwrap());
}

#[tokio::test]
async fn schema_describes_every_field() {
    let (service, _) = memory_service();

    let output = service.execute_command("config", "schema", &[]).await.unwrap();
    let schema: Value = serde_json::from_str(&output).unwrap();
    let properties = schema["properties"].as_object().unwrap();

    for field in [
        "backgroundColor",
        "fontColor",
        "fontFamily",
        "fontSize",
        "timeFormat",
        "dateFormat",
        "additionalTimezones",
    ] {
        assert!(properties.contains_key(field), "missing {field}");
    }
}

#[tokio::test]
async fn timezone_add_list_remove() {
    let (service, storage) = memory_service();

    let output = service
        .execute_command("timezone", "add", &args(&["Asia/Tokyo"]))
        .await
        .unwrap();
    assert_eq!(output, "Added timezone 'Asia/Tokyo'");

    let output = service
        .execute_command("timezone", "add", &args(&["Asia/Tokyo"]))
        .await
        .unwrap();
    assert_eq!(output, "Timezone 'Asia/Tokyo' is already configured");

    service
        .execute_command("timezone", "add", &args(&["America/Los_Angeles"]))
        .await
        .unwrap();

    let output = service.execute_command("timezone", "list", &[]).await.unwrap();
    assert_eq!(output, "Asia/Tokyo (Tokyo)\nAmerica/Los_Angeles (Los Angeles)");

    let output = service
        .execute_command("timezone", "remove", &args(&["Asia/Tokyo"]))
        .await
        .unwrap();
    assert_eq!(output, "Removed timezone 'Asia/Tokyo'");

    let stored = storage.get(SETTINGS_KEY).unwrap();
    assert_eq!(stored["additionalTimezones"], json!(["America/Los_Angeles"]));
}

#[tokio::test]
async fn timezone_add_sanitises_and_rejects_empty_ids() {
    let (service, storage) = memory_service();

    let result = service
        .execute_command("timezone", "add", &args(&["..."]))
        .await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
    assert_eq!(storage.writes(), 0);

    let output = service
        .execute_command("timezone", "add", &args(&["Europe/Paris<script>"]))
        .await
        .unwrap();
    assert!(output.starts_with("Added timezone 'Europe/Parisscript'"));
    assert!(output.contains("not in the timezone database"));
}

#[tokio::test]
async fn timezone_remove_absent_is_a_no_op() {
    let (service, storage) = memory_service();

    let output = service
        .execute_command("timezone", "remove", &args(&["Asia/Tokyo"]))
        .await
        .unwrap();

    assert_eq!(output, "Timezone 'Asia/Tokyo' is not configured");
    assert_eq!(storage.writes(), 0);
}

#[tokio::test]
async fn timezone_list_when_empty() {
    let (service, _) = memory_service();

    let output = service.execute_command("timezone", "list", &[]).await.unwrap();

    assert_eq!(output, "No additional timezones configured");
}

#[tokio::test]
async fn timezone_available_by_region() {
    let (service, _) = memory_service();

    let regions = service
        .execute_command("timezone", "available", &[])
        .await
        .unwrap();
    assert!(regions.lines().any(|line| line.starts_with("Europe (")));

    let europe = service
        .execute_command("timezone", "available", &args(&["Europe"]))
        .await
        .unwrap();
    assert!(europe.lines().any(|line| line == "Europe/Paris  Paris"));

    let result = service
        .execute_command("timezone", "available", &args(&["Atlantis"]))
        .await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[test]
fn describe_clocks_lists_local_first() {
    let config = Config {
        time_format: TimeFormat::Hour12,
        additional_timezones: vec!["UTC".to_string(), "Mars/Olympus_Mons".to_string()],
        ..Config::default()
    };
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap();

    let lines = describe_clocks(&config, &LocalZone::named("Asia/Tokyo"), now);

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Tokyo  "));
    assert_eq!(lines[1], "UTC  3:30:00 PM  Monday, January 1, 2024");
    assert_eq!(lines[2], "Olympus Mons  unknown timezone 'Mars/Olympus_Mons'");
}

#[tokio::test]
async fn clock_show_prints_one_line_per_clock() {
    let storage = Arc::new(MemoryStorage::with_value(
        SETTINGS_KEY,
        json!({"additionalTimezones": ["Asia/Tokyo", "Europe/Paris"]}),
    ));
    let service = CliService::new(ConfigStore::new(storage));

    let output = service.execute_command("clock", "show", &[]).await.unwrap();

    assert_eq!(output.lines().count(), 3);
    assert!(output.lines().nth(1).unwrap().starts_with("Tokyo  "));
    assert!(output.lines().nth(2).unwrap().starts_with("Paris  "));
}

#[tokio::test]
async fn help_lists_categories() {
    let (service, _) = memory_service();

    let overview = service.execute_command("help", "", &[]).await.unwrap();
    assert!(overview.contains("timezone"));
    assert!(overview.contains("run"));

    let details = service.execute_command("help", "config", &[]).await.unwrap();
    assert!(details.contains("worldclock config set timeFormat 12"));

    let details = service.execute_command("timezone", "", &[]).await.unwrap();
    assert!(details.contains("worldclock timezone add Asia/Tokyo"));

    let result = service.execute_command("help", "alarm", &[]).await;
    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}
