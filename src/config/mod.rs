//! Configuration schema definitions and validation.
//!
//! Defines the settings record shown and edited by the clock display. The
//! record is persisted as a single JSON value; see [`crate::config_store`].

mod formats;
mod merging;
mod paths;
mod setting;
pub mod validation;

#[cfg(test)]
mod tests;

pub use formats::{DateFormat, TimeFormat, UnknownVariant};
pub use merging::merge_stored;
pub use paths::ConfigPaths;
pub use setting::SettingField;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default page background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#1a1a2e";
/// Default text colour.
pub const DEFAULT_FONT_COLOR: &str = "#ffffff";
/// Default font stack.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Settings for the world clock display.
///
/// Always complete: values missing from storage are filled from
/// [`Config::default`] when loading.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Page background colour (`#RGB` or `#RRGGBB`).
    #[serde(alias = "bgColor")]
    pub background_color: String,

    /// Text colour (`#RGB` or `#RRGGBB`).
    pub font_color: String,

    /// CSS font stack used for all text.
    pub font_family: String,

    /// Base font size in pixels, between 12 and 48.
    pub font_size: u32,

    /// 12 or 24 hour clock.
    pub time_format: TimeFormat,

    /// Verbosity of the date line.
    pub date_format: DateFormat,

    /// IANA timezone identifiers shown next to the local clock, in display order.
    pub additional_timezones: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: validation::DEFAULT_FONT_SIZE,
            time_format: TimeFormat::default(),
            date_format: DateFormat::default(),
            additional_timezones: Vec::new(),
        }
    }
}

impl Config {
    /// Runs every validator over the record.
    ///
    /// Colours fall back to the defaults here since there is no earlier value
    /// to keep; timezone ids are sanitised and de-duplicated in order.
    pub fn sanitized(mut self) -> Self {
        self.background_color =
            validation::validate_color(&self.background_color, DEFAULT_BACKGROUND_COLOR);
        self.font_color = validation::validate_color(&self.font_color, DEFAULT_FONT_COLOR);
        self.font_size = validation::font_size_in_range(i64::from(self.font_size));

        let zones = std::mem::take(&mut self.additional_timezones);
        for zone in zones {
            self.push_timezone(&zone);
        }

        self
    }

    /// Appends a sanitised timezone id.
    ///
    /// Returns the stored id, or `None` when it was empty after sanitising or
    /// already present.
    pub fn push_timezone(&mut self, raw: &str) -> Option<String> {
        let id = validation::sanitize_timezone_id(raw);
        if id.is_empty() || self.additional_timezones.contains(&id) {
            return None;
        }

        self.additional_timezones.push(id.clone());
        Some(id)
    }

    /// Removes a timezone id, returning whether it was present.
    pub fn remove_timezone(&mut self, id: &str) -> bool {
        match self.additional_timezones.iter().position(|zone| zone == id) {
            Some(index) => {
                self.additional_timezones.remove(index);
                true
            }
            None => false,
        }
    }
}
