use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    clock::ClockKey,
    config::Config,
    config_store::ConfigStore,
    formatting::{LocalZone, ZoneFormatter, zone_display_name},
};

/// Prints every configured clock once using the stored formats.
pub struct ShowCommand {
    config_store: ConfigStore,
}

impl ShowCommand {
    /// Creates a new ShowCommand with the provided config store.
    pub fn new(config_store: ConfigStore) -> Self {
        Self { config_store }
    }
}

#[async_trait]
impl Command for ShowCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let config = self.config_store.load().await;
        let lines = describe_clocks(&config, &LocalZone::detect(), Utc::now());

        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "show".to_string(),
            description: "Print the current time of every clock".to_string(),
            category: "clock".to_string(),
            args: vec![],
            examples: vec!["worldclock clock show".to_string()],
        }
    }
}

/// One line per clock, local first: `label  time  date`.
///
/// Zones that cannot be resolved are listed as unknown instead of failing
/// the whole listing.
pub fn describe_clocks(config: &Config, local: &LocalZone, now: DateTime<Utc>) -> Vec<String> {
    let keys = std::iter::once(ClockKey::Local).chain(
        config
            .additional_timezones
            .iter()
            .map(|zone| ClockKey::Zone(zone.clone())),
    );

    keys.map(|key| {
        let label = match &key {
            ClockKey::Local => local.label(),
            ClockKey::Zone(zone) => zone_display_name(zone),
        };

        match ZoneFormatter::new(key.zone(), config.time_format) {
            Ok(formatter) => format!(
                "{label}  {}  {}",
                formatter.format_time(now),
                formatter.format_date(now, config.date_format)
            ),
            Err(e) => format!("{label}  {e}"),
        }
    })
    .collect()
}
