use std::collections::{HashMap, hash_map::Entry};

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::config::{DateFormat, TimeFormat};

use super::FormatError;

const TIME_24H: &str = "%H:%M:%S";
const TIME_12H: &str = "%-I:%M:%S %p";
const DATE_SHORT: &str = "%-m/%-d/%Y";
const DATE_MEDIUM: &str = "%b %-d, %Y";
const DATE_LONG: &str = "%A, %B %-d, %Y";

/// Cache key: one formatter per zone and hour cycle.
///
/// The empty zone denotes the system local timezone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatterKey {
    /// IANA identifier, or empty for local time
    pub zone: String,
    /// Hour cycle the formatter renders
    pub time_format: TimeFormat,
}

impl FormatterKey {
    /// Creates a key for `zone` and `time_format`.
    pub fn new(zone: &str, time_format: TimeFormat) -> Self {
        Self {
            zone: zone.to_string(),
            time_format,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FormatZone {
    System,
    Named(Tz),
}

/// A resolved timezone plus the hour cycle to render it with.
#[derive(Debug, Clone)]
pub struct ZoneFormatter {
    zone: FormatZone,
    hour12: bool,
}

impl ZoneFormatter {
    /// Resolves `zone` and builds a formatter for it.
    ///
    /// An empty `zone` formats in the system local timezone.
    ///
    /// # Errors
    /// Returns `FormatError::UnknownTimezone` if the identifier is not in the
    /// timezone database.
    pub fn new(zone: &str, time_format: TimeFormat) -> Result<Self, FormatError> {
        let zone = if zone.is_empty() {
            FormatZone::System
        } else {
            let tz = zone
                .parse::<Tz>()
                .map_err(|_| FormatError::UnknownTimezone {
                    zone: zone.to_string(),
                })?;
            FormatZone::Named(tz)
        };

        Ok(Self {
            zone,
            hour12: time_format.is_hour12(),
        })
    }

    /// Time of day, e.g. `15:30:00` or `3:30:00 PM`.
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        let pattern = if self.hour12 { TIME_12H } else { TIME_24H };
        self.render(instant, pattern)
    }

    /// Calendar date at the requested verbosity.
    pub fn format_date(&self, instant: DateTime<Utc>, date_format: DateFormat) -> String {
        let pattern = match date_format {
            DateFormat::Short => DATE_SHORT,
            DateFormat::Medium => DATE_MEDIUM,
            DateFormat::Long => DATE_LONG,
        };
        self.render(instant, pattern)
    }

    fn render(&self, instant: DateTime<Utc>, pattern: &str) -> String {
        match self.zone {
            FormatZone::System => instant.with_timezone(&Local).format(pattern).to_string(),
            FormatZone::Named(tz) => instant.with_timezone(&tz).format(pattern).to_string(),
        }
    }
}

/// Reusable formatters keyed by zone and hour cycle.
///
/// Entries are created lazily and never invalidated individually: toggling
/// the hour cycle simply creates new keys. Failed lookups are not cached.
#[derive(Debug, Default)]
pub struct FormatterCache {
    formatters: HashMap<FormatterKey, ZoneFormatter>,
}

impl FormatterCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the formatter for `zone`, building it on first use.
    ///
    /// # Errors
    /// Returns `FormatError::UnknownTimezone` if the formatter cannot be built.
    pub fn get_or_create(
        &mut self,
        zone: &str,
        time_format: TimeFormat,
    ) -> Result<&ZoneFormatter, FormatError> {
        match self.formatters.entry(FormatterKey::new(zone, time_format)) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let formatter = ZoneFormatter::new(zone, time_format)?;
                debug!(zone, %time_format, "Created formatter");
                Ok(&*entry.insert(formatter))
            }
        }
    }

    /// Whether a formatter for the key is cached.
    pub fn contains(&self, zone: &str, time_format: TimeFormat) -> bool {
        self.formatters
            .contains_key(&FormatterKey::new(zone, time_format))
    }

    /// Number of cached formatters.
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Drops every cached formatter.
    pub fn clear(&mut self) {
        self.formatters.clear();
    }
}
