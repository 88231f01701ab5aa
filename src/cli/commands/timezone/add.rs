use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::info;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::validation::sanitize_timezone_id,
    config_store::ConfigStore,
};

/// Appends a timezone to the stored list.
///
/// The identifier is sanitised the same way as in the settings panel.
/// Identifiers missing from the timezone database are stored anyway; the
/// display skips them until they resolve.
pub struct AddCommand {
    config_store: ConfigStore,
}

impl AddCommand {
    /// Creates a new AddCommand with the provided config store.
    pub fn new(config_store: ConfigStore) -> Self {
        Self { config_store }
    }
}

#[async_trait]
impl Command for AddCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let raw = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <timezone> argument for 'add' command".to_string())
        })?;

        if sanitize_timezone_id(raw).is_empty() {
            return Err(CliError::InvalidArguments(format!(
                "'{raw}' is not a timezone identifier"
            )));
        }

        let mut config = self.config_store.load().await;
        let Some(zone) = config.push_timezone(raw) else {
            return Ok(format!(
                "Timezone '{}' is already configured",
                sanitize_timezone_id(raw)
            ));
        };

        self.config_store.save(&config).await?;
        info!(%zone, "Timezone added from CLI");

        if zone.parse::<Tz>().is_err() {
            return Ok(format!(
                "Added timezone '{zone}' (not in the timezone database, it will not be shown)"
            ));
        }

        Ok(format!("Added timezone '{zone}'"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "add".to_string(),
            description: "Add a timezone to the display".to_string(),
            category: "timezone".to_string(),
            args: vec![CommandArg {
                name: "timezone".to_string(),
                description: "IANA timezone identifier (e.g., Asia/Tokyo)".to_string(),
                required: true,
                value_type: ArgType::Timezone,
            }],
            examples: vec![
                "worldclock timezone add Asia/Tokyo".to_string(),
                "worldclock timezone add America/Los_Angeles".to_string(),
            ],
        }
    }
}
