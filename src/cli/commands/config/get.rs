use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_json_value,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config_store::ConfigStore,
};

/// Command for reading one stored setting.
///
/// The value is read through the same merge as the display uses, so missing
/// or invalid stored fields show their effective default.
///
/// # Example Usage
///
/// ```bash
/// worldclock config get fontSize
/// worldclock config get additionalTimezones
/// ```
pub struct GetCommand {
    config_store: ConfigStore,
}

impl GetCommand {
    /// Creates a new GetCommand with the provided config store.
    pub fn new(config_store: ConfigStore) -> Self {
        Self { config_store }
    }
}

#[async_trait]
impl Command for GetCommand {
    /// Looks up `field` in the effective settings record.
    ///
    /// # Errors
    ///
    /// * `CliError::InvalidArguments` - If the field is missing or unknown
    /// * `CliError::ConfigError` - If the record cannot be converted for display
    async fn execute(&self, args: &[String]) -> CommandResult {
        let field = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <field> argument for 'get' command".to_string())
        })?;

        let config = self.config_store.load().await;
        let record =
            serde_json::to_value(&config).map_err(|e| CliError::ConfigError(e.to_string()))?;

        let value = record.get(field.as_str()).ok_or_else(|| {
            CliError::InvalidArguments(format!("Unknown settings field '{field}'"))
        })?;

        Ok(format!("{}: {}", field, format_json_value(value)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Get a settings value".to_string(),
            category: "config".to_string(),
            args: vec![CommandArg {
                name: "field".to_string(),
                description: "Settings field (e.g., fontSize, timeFormat)".to_string(),
                required: true,
                value_type: ArgType::Field,
            }],
            examples: vec![
                "worldclock config get fontSize".to_string(),
                "worldclock config get additionalTimezones".to_string(),
            ],
        }
    }
}
