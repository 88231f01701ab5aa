use async_trait::async_trait;
use tracing::info;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config_store::ConfigStore,
};

/// Removes a timezone from the stored list. Removing an absent one is a no-op.
pub struct RemoveCommand {
    config_store: ConfigStore,
}

impl RemoveCommand {
    /// Creates a new RemoveCommand with the provided config store.
    pub fn new(config_store: ConfigStore) -> Self {
        Self { config_store }
    }
}

#[async_trait]
impl Command for RemoveCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let zone = args.first().ok_or_else(|| {
            CliError::InvalidArguments(
                "Expected <timezone> argument for 'remove' command".to_string(),
            )
        })?;

        let mut config = self.config_store.load().await;
        if !config.remove_timezone(zone) {
            return Ok(format!("Timezone '{zone}' is not configured"));
        }

        self.config_store.save(&config).await?;
        info!(%zone, "Timezone removed from CLI");

        Ok(format!("Removed timezone '{zone}'"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "remove".to_string(),
            description: "Remove a timezone from the display".to_string(),
            category: "timezone".to_string(),
            args: vec![CommandArg {
                name: "timezone".to_string(),
                description: "Configured timezone identifier".to_string(),
                required: true,
                value_type: ArgType::Timezone,
            }],
            examples: vec!["worldclock timezone remove Asia/Tokyo".to_string()],
        }
    }
}
