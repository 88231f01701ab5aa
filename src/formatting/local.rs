use std::{env, fs, path::Path};

use chrono_tz::Tz;
use tracing::debug;

use super::zone_display_name;

/// Label shown for the local clock when its zone cannot be resolved.
pub const LOCAL_PLACEHOLDER: &str = "Local Time";

const LOCALTIME_LINK: &str = "/etc/localtime";
const TIMEZONE_FILE: &str = "/etc/timezone";

/// The system timezone, if it could be identified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalZone {
    name: Option<String>,
}

impl LocalZone {
    /// Identifies the system timezone from `TZ`, `/etc/localtime` or
    /// `/etc/timezone`, in that order.
    pub fn detect() -> Self {
        let name = env::var("TZ")
            .ok()
            .and_then(|tz| known_zone(tz.trim_start_matches(':')))
            .or_else(|| from_localtime_link(Path::new(LOCALTIME_LINK)))
            .or_else(|| {
                fs::read_to_string(TIMEZONE_FILE)
                    .ok()
                    .and_then(|content| known_zone(content.trim()))
            });

        debug!(zone = ?name, "Detected local timezone");
        Self { name }
    }

    /// A local zone with a fixed name, unresolved if it is not a known zone.
    pub fn named(name: &str) -> Self {
        Self {
            name: known_zone(name),
        }
    }

    /// A local zone that could not be identified.
    pub fn unresolved() -> Self {
        Self { name: None }
    }

    /// IANA identifier of the local zone, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Label for the local clock: the zone's city, or [`LOCAL_PLACEHOLDER`].
    pub fn label(&self) -> String {
        self.name
            .as_deref()
            .map(zone_display_name)
            .unwrap_or_else(|| LOCAL_PLACEHOLDER.to_string())
    }
}

fn known_zone(candidate: &str) -> Option<String> {
    candidate
        .parse::<Tz>()
        .ok()
        .map(|tz| tz.name().to_string())
}

fn from_localtime_link(link: &Path) -> Option<String> {
    let target = fs::read_link(link).ok()?;
    let target = target.to_string_lossy();
    let (_, zone) = target.split_once("zoneinfo/")?;
    known_zone(zone)
}
