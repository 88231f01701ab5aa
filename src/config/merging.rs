use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::Config;

/// Keys written by earlier releases, mapped to their current names.
const LEGACY_KEYS: &[(&str, &str)] = &[("bgColor", "backgroundColor")];

/// Builds a complete [`Config`] from a possibly partial stored value.
///
/// Fields are taken from `stored` one at a time on top of the defaults: a
/// field that is missing or does not deserialise keeps its default, unknown
/// keys are ignored. The result is passed through [`Config::sanitized`].
pub fn merge_stored(stored: &Value) -> Config {
    let Value::Object(stored) = stored else {
        warn!("Stored settings are not an object, using defaults");
        return Config::default();
    };

    let Ok(Value::Object(mut merged)) = serde_json::to_value(Config::default()) else {
        return Config::default();
    };

    for (key, value) in normalize_keys(stored) {
        let Some(default_value) = merged.get(&key).cloned() else {
            debug!(key, "Ignoring unknown stored settings field");
            continue;
        };

        let candidate_value = merge_two_values(default_value.clone(), value);
        merged.insert(key.clone(), candidate_value);

        if serde_json::from_value::<Config>(Value::Object(merged.clone())).is_err() {
            warn!(key, "Stored settings field is invalid, keeping default");
            merged.insert(key, default_value);
        }
    }

    serde_json::from_value::<Config>(Value::Object(merged))
        .map(Config::sanitized)
        .unwrap_or_default()
}

fn normalize_keys(stored: &Map<String, Value>) -> Map<String, Value> {
    let mut normalized = stored.clone();

    for (legacy, current) in LEGACY_KEYS {
        if let Some(value) = normalized.remove(*legacy) {
            normalized
                .entry((*current).to_string())
                .or_insert(value);
        }
    }

    normalized
}

/// Deep merges two JSON values with `overlay` taking precedence.
///
/// Objects are merged key by key; any other overlay value replaces the base.
pub fn merge_two_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged_map = overlay_map;

            for (key, base_value) in base_map {
                match merged_map.remove(&key) {
                    None => {
                        merged_map.insert(key, base_value);
                    }
                    Some(overlay_value) => {
                        let merged_value = merge_two_values(base_value, overlay_value);
                        merged_map.insert(key, merged_value);
                    }
                }
            }

            Value::Object(merged_map)
        }
        (_, overlay) => overlay,
    }
}
