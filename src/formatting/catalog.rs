use std::collections::BTreeMap;

use chrono_tz::TZ_VARIANTS;

/// One selectable timezone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimezoneOption {
    /// IANA identifier
    pub id: String,
    /// Readable name: everything after the region, underscores as spaces
    pub label: String,
}

/// Every known timezone grouped by region (first path segment).
///
/// Regions and the zones inside them are sorted.
#[derive(Debug, Clone, Default)]
pub struct TimezoneCatalog {
    regions: BTreeMap<String, Vec<TimezoneOption>>,
}

impl TimezoneCatalog {
    /// Builds the catalog from the bundled timezone database.
    pub fn load() -> Self {
        Self::from_ids(TZ_VARIANTS.iter().map(|tz| tz.name()))
    }

    /// Builds a catalog from arbitrary identifiers.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut regions: BTreeMap<String, Vec<TimezoneOption>> = BTreeMap::new();

        for id in ids {
            let (region, rest) = id.split_once('/').unwrap_or((id, id));
            regions
                .entry(region.to_string())
                .or_default()
                .push(TimezoneOption {
                    id: id.to_string(),
                    label: rest.replace('_', " "),
                });
        }

        for options in regions.values_mut() {
            options.sort();
            options.dedup();
        }

        Self { regions }
    }

    /// Region names in order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Zones of one region, if it exists.
    pub fn region(&self, region: &str) -> Option<&[TimezoneOption]> {
        self.regions.get(region).map(Vec::as_slice)
    }

    /// Every (region, zones) group in order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[TimezoneOption])> {
        self.regions
            .iter()
            .map(|(region, options)| (region.as_str(), options.as_slice()))
    }

    /// Total number of zones.
    pub fn len(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Whether the catalog has no zones.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
