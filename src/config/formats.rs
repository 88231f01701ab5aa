use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hour cycle used when rendering clock times.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash, Default)]
pub enum TimeFormat {
    /// 12-hour clock with an AM/PM suffix.
    #[serde(rename = "12")]
    Hour12,

    /// 24-hour clock (default).
    #[default]
    #[serde(rename = "24")]
    Hour24,
}

impl TimeFormat {
    /// Whether this format renders a 12-hour clock.
    pub fn is_hour12(self) -> bool {
        self == TimeFormat::Hour12
    }

    /// Wire representation, as stored and as typed by users.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeFormat::Hour12 => "12",
            TimeFormat::Hour24 => "24",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12" => Ok(TimeFormat::Hour12),
            "24" => Ok(TimeFormat::Hour24),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Verbosity of the rendered date line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// Numeric month/day/year, e.g. `1/1/2024`.
    Short,

    /// Abbreviated month, e.g. `Jan 1, 2024`.
    Medium,

    /// Weekday and full month name, e.g. `Monday, January 1, 2024` (default).
    #[default]
    Long,
}

impl DateFormat {
    /// Wire representation, as stored and as typed by users.
    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Short => "short",
            DateFormat::Medium => "medium",
            DateFormat::Long => "long",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(DateFormat::Short),
            "medium" => Ok(DateFormat::Medium),
            "long" => Ok(DateFormat::Long),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// A string that names none of an enum's variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);
