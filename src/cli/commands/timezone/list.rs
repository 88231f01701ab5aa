use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config_store::ConfigStore,
    formatting::zone_display_name,
};

/// Lists the configured additional timezones in display order.
pub struct ListCommand {
    config_store: ConfigStore,
}

impl ListCommand {
    /// Creates a new ListCommand with the provided config store.
    pub fn new(config_store: ConfigStore) -> Self {
        Self { config_store }
    }
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let config = self.config_store.load().await;
        if config.additional_timezones.is_empty() {
            return Ok("No additional timezones configured".to_string());
        }

        let lines: Vec<String> = config
            .additional_timezones
            .iter()
            .map(|zone| format!("{zone} ({})", zone_display_name(zone)))
            .collect();

        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List the configured timezones".to_string(),
            category: "timezone".to_string(),
            args: vec![],
            examples: vec!["worldclock timezone list".to_string()],
        }
    }
}
