//! Timezone-aware time and date formatting.
//!
//! Building a formatter resolves the IANA identifier against the bundled
//! timezone database, so formatters are kept in a [`FormatterCache`] and
//! reused on every tick.

mod cache;
mod catalog;
mod local;


pub use cache::{FormatterCache, FormatterKey, ZoneFormatter};
pub use catalog::{TimezoneCatalog, TimezoneOption};
pub use local::{LOCAL_PLACEHOLDER, LocalZone};

use chrono::{DateTime, Utc};

use crate::config::TimeFormat;

/// Errors produced while formatting a clock.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The identifier is not in the timezone database
    #[error("unknown timezone '{zone}'")]
    UnknownTimezone {
        /// Identifier that failed to resolve
        zone: String,
    },
}

/// Short display name for an IANA identifier.
///
/// Takes the last path segment and replaces underscores with spaces, so
/// `America/Los_Angeles` becomes `Los Angeles`.
pub fn zone_display_name(zone: &str) -> String {
    zone.rsplit('/').next().unwrap_or(zone).replace('_', " ")
}

/// Formats the time of day for `instant` in `zone`.
///
/// # Errors
/// Returns `FormatError::UnknownTimezone` if `zone` cannot be resolved.
pub fn format_time_for_zone(
    instant: DateTime<Utc>,
    zone: &str,
    time_format: TimeFormat,
) -> Result<String, FormatError> {
    let formatter = ZoneFormatter::new(zone, time_format)?;
    Ok(formatter.format_time(instant))
}
