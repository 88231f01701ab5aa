use async_trait::async_trait;
use tracing::info;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
    config_store::ConfigStore,
};

/// Command that overwrites the stored settings with the defaults.
pub struct ResetCommand {
    config_store: ConfigStore,
}

impl ResetCommand {
    /// Creates a new ResetCommand with the provided config store.
    pub fn new(config_store: ConfigStore) -> Self {
        Self { config_store }
    }
}

#[async_trait]
impl Command for ResetCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        self.config_store.save(&Config::default()).await?;
        info!("Settings reset from CLI");

        Ok("Settings reset to default!".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "reset".to_string(),
            description: "Restore the default settings".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["worldclock config reset".to_string()],
        }
    }
}
