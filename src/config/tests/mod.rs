//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and stored-value merging.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic, clippy::unwrap_used)]

use proptest::prelude::*;
use serde_json::json;

use crate::config::{
    Config, ConfigPaths, DateFormat, SettingField, TimeFormat, merge_stored,
    validation::{
        sanitize_element_key, sanitize_timezone_id, validate_color, validate_date_format,
        validate_font_size, validate_time_format,
    },
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.background_color, "#1a1a2e");
    assert_eq!(config.font_color, "#ffffff");
    assert_eq!(config.font_family, "Arial, sans-serif");
    assert_eq!(config.font_size, 16);
    assert_eq!(config.time_format, TimeFormat::Hour24);
    assert_eq!(config.date_format, DateFormat::Long);
    assert!(config.additional_timezones.is_empty());
}

#[test]
fn config_serializes_with_stored_field_names() {
    let value = serde_json::to_value(Config::default()).unwrap();

    assert_eq!(value["backgroundColor"], "#1a1a2e");
    assert_eq!(value["timeFormat"], "24");
    assert_eq!(value["dateFormat"], "long");
    assert_eq!(value["additionalTimezones"], json!([]));
}

#[test]
fn config_serialize_roundtrip() {
    let mut original = Config::default();
    original.time_format = TimeFormat::Hour12;
    original.additional_timezones = vec!["Asia/Tokyo".to_string()];

    let json = serde_json::to_string(&original).unwrap();
    let deserialized: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn color_accepts_short_and_long_hex() {
    assert_eq!(validate_color("#abc", "#000000"), "#abc");
    assert_eq!(validate_color("#A1b2C3", "#000000"), "#A1b2C3");
}

#[test]
fn color_rejects_everything_else() {
    for input in ["", "abc", "#ab", "#abcd", "#abcdefg", "#ggg", " #abc", "red"] {
        assert_eq!(validate_color(input, "#123456"), "#123456", "input {input:?}");
    }
}

#[test]
fn font_size_boundaries_are_kept() {
    assert_eq!(validate_font_size("12"), 12);
    assert_eq!(validate_font_size("48"), 48);
    assert_eq!(validate_font_size(" 20 "), 20);
}

#[test]
fn font_size_out_of_range_or_garbage_resets() {
    assert_eq!(validate_font_size("11"), 16);
    assert_eq!(validate_font_size("49"), 16);
    assert_eq!(validate_font_size("-3"), 16);
    assert_eq!(validate_font_size("big"), 16);
    assert_eq!(validate_font_size("abc"), 16);
    assert_eq!(validate_font_size("px20"), 16);
    assert_eq!(validate_font_size("-"), 16);
    assert_eq!(validate_font_size("99999999999999999999999"), 16);
    assert_eq!(validate_font_size(""), 16);
}

#[test]
fn font_size_reads_leading_integer() {
    assert_eq!(validate_font_size("20px"), 20);
    assert_eq!(validate_font_size("12.5"), 12);
    assert_eq!(validate_font_size("48.0"), 48);
    assert_eq!(validate_font_size("+30"), 30);
    assert_eq!(validate_font_size("  24 points"), 24);
}

#[test]
fn stored_font_size_outside_range_resets() {
    let config = merge_stored(&json!({"fontSize": 400}));
    assert_eq!(config.font_size, 16);

    let config = merge_stored(&json!({"fontSize": 36}));
    assert_eq!(config.font_size, 36);
}

#[test]
fn formats_fall_back_to_defaults() {
    assert_eq!(validate_time_format("12"), TimeFormat::Hour12);
    assert_eq!(validate_time_format("13"), TimeFormat::Hour24);
    assert_eq!(validate_date_format("short"), DateFormat::Short);
    assert_eq!(validate_date_format("medium"), DateFormat::Medium);
    assert_eq!(validate_date_format("SHORT"), DateFormat::Long);
}

#[test]
fn timezone_sanitizer_strips_dots() {
    assert_eq!(sanitize_timezone_id("../../etc/passwd"), "//etc/passwd");
    assert_eq!(sanitize_timezone_id("America/Los_Angeles"), "America/Los_Angeles");
    assert_eq!(sanitize_timezone_id("Etc/GMT+5"), "Etc/GMT5");
}

#[test]
fn timezone_sanitizer_truncates() {
    let long = "A".repeat(80);
    assert_eq!(sanitize_timezone_id(&long).len(), 50);
}

#[test]
fn element_key_replaces_unsafe_characters() {
    assert_eq!(sanitize_element_key("America/New_York"), "America-New_York");
    assert_eq!(sanitize_element_key("a b.c"), "a-b-c");
}

#[test]
fn apply_keeps_last_good_color_per_field() {
    let mut config = Config::default();

    assert!(config.apply(SettingField::FontColor, "#00ff00"));
    assert!(!config.apply(SettingField::FontColor, "green"));

    assert_eq!(config.font_color, "#00ff00");
    assert_eq!(config.background_color, "#1a1a2e");
}

#[test]
fn apply_reports_format_changes() {
    let mut config = Config::default();

    assert!(config.apply(SettingField::TimeFormat, "12"));
    assert!(!config.apply(SettingField::TimeFormat, "12"));
    assert!(config.apply(SettingField::TimeFormat, "bogus"));
    assert_eq!(config.time_format, TimeFormat::Hour24);
}

#[test]
fn setting_field_parses_stored_names() {
    assert_eq!("fontSize".parse::<SettingField>().unwrap(), SettingField::FontSize);
    assert!("font_size".parse::<SettingField>().is_err());
    assert!(SettingField::DateFormat.restarts_clocks());
    assert!(!SettingField::FontFamily.restarts_clocks());
}

#[test]
fn push_timezone_never_duplicates() {
    let mut config = Config::default();

    assert_eq!(config.push_timezone("Europe/Paris"), Some("Europe/Paris".to_string()));
    assert_eq!(config.push_timezone("Europe/Paris"), None);
    assert_eq!(config.push_timezone("..."), None);

    assert_eq!(config.additional_timezones, vec!["Europe/Paris".to_string()]);
}

#[test]
fn remove_absent_timezone_is_noop() {
    let mut config = Config::default();
    config.push_timezone("Asia/Tokyo");
    let before = config.clone();

    assert!(!config.remove_timezone("Europe/Paris"));
    assert_eq!(config, before);
}

#[test]
fn merge_fills_missing_fields_with_defaults() {
    let config = merge_stored(&json!({ "fontSize": 20, "timeFormat": "12" }));

    assert_eq!(config.font_size, 20);
    assert_eq!(config.time_format, TimeFormat::Hour12);
    assert_eq!(config.background_color, "#1a1a2e");
    assert_eq!(config.date_format, DateFormat::Long);
}

#[test]
fn merge_ignores_unknown_and_invalid_fields() {
    let config = merge_stored(&json!({
        "unknownField": true,
        "fontSize": "huge",
        "dateFormat": "eternal",
        "fontFamily": "Georgia, serif",
    }));

    assert_eq!(config.font_size, 16);
    assert_eq!(config.date_format, DateFormat::Long);
    assert_eq!(config.font_family, "Georgia, serif");
}

#[test]
fn merge_accepts_legacy_background_key() {
    let config = merge_stored(&json!({ "bgColor": "#000" }));

    assert_eq!(config.background_color, "#000");
}

#[test]
fn merge_sanitizes_stored_values() {
    let config = merge_stored(&json!({
        "backgroundColor": "blue",
        "fontSize": 200,
        "additionalTimezones": ["Asia/Tokyo", "Asia/Tokyo", "Europe/Paris", "!!"],
    }));

    assert_eq!(config.background_color, "#1a1a2e");
    assert_eq!(config.font_size, 16);
    assert_eq!(
        config.additional_timezones,
        vec!["Asia/Tokyo".to_string(), "Europe/Paris".to_string()]
    );
}

#[test]
fn merge_of_non_object_is_default() {
    assert_eq!(merge_stored(&json!("garbage")), Config::default());
    assert_eq!(merge_stored(&json!(null)), Config::default());
}

#[test]
fn config_paths_end_with_app_dir() {
    if std::env::var("HOME").is_ok() || std::env::var("XDG_CONFIG_HOME").is_ok() {
        let settings = ConfigPaths::settings_file().unwrap();
        assert!(settings.ends_with("worldclock/settings.json"));
    }
}

#[test]
fn app_dir_prefers_xdg_variable() {
    let lookup = |name: &str| match name {
        "XDG_STATE_HOME" => Some("/var/state".to_string()),
        "HOME" => Some("/home/ada".to_string()),
        _ => None,
    };

    let dir = ConfigPaths::app_dir(lookup, "XDG_STATE_HOME", ".local/state").unwrap();
    assert_eq!(dir, std::path::PathBuf::from("/var/state/worldclock"));
}

#[test]
fn app_dir_falls_back_to_home() {
    let lookup = |name: &str| (name == "HOME").then(|| "/home/ada".to_string());

    let dir = ConfigPaths::app_dir(lookup, "XDG_CONFIG_HOME", ".config").unwrap();
    assert_eq!(dir, std::path::PathBuf::from("/home/ada/.config/worldclock"));

    let missing = ConfigPaths::app_dir(|_| None, "XDG_CONFIG_HOME", ".config");
    assert!(missing.is_err());
}

proptest! {
    #[test]
    fn color_kept_iff_hex(input in "#?[0-9A-Fa-fxyz]{0,8}") {
        let is_hex = input.len() == 4 || input.len() == 7;
        let is_hex = is_hex
            && input.starts_with('#')
            && input[1..].chars().all(|c| c.is_ascii_hexdigit());

        let result = validate_color(&input, "#010203");
        if is_hex {
            prop_assert_eq!(result, input);
        } else {
            prop_assert_eq!(result, "#010203");
        }
    }

    #[test]
    fn font_size_in_range_or_default(size in -1000i64..1000) {
        let result = validate_font_size(&size.to_string());
        if (12..=48).contains(&size) {
            prop_assert_eq!(i64::from(result), size);
        } else {
            prop_assert_eq!(result, 16);
        }
    }

    #[test]
    fn repeated_pushes_keep_timezones_unique(zones in proptest::collection::vec("[A-C]/[a-c]", 0..20)) {
        let mut config = Config::default();
        for zone in &zones {
            config.push_timezone(zone);
        }

        let mut seen = std::collections::HashSet::new();
        prop_assert!(config.additional_timezones.iter().all(|zone| seen.insert(zone.clone())));
    }
}
