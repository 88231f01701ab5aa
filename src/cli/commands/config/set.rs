use async_trait::async_trait;
use tracing::info;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::SettingField,
    config_store::ConfigStore,
};

/// Command for editing one stored setting.
///
/// The value goes through the same validators as the settings panel:
/// invalid colours keep the previous colour, font sizes outside `[12, 48]`
/// become 16 and unknown formats fall back to their defaults.
pub struct SetCommand {
    config_store: ConfigStore,
}

impl SetCommand {
    /// Creates a new SetCommand with the provided config store.
    pub fn new(config_store: ConfigStore) -> Self {
        Self { config_store }
    }
}

#[async_trait]
impl Command for SetCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let name = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <field> argument for 'set' command".to_string())
        })?;

        let value = args.get(1).ok_or_else(|| {
            CliError::InvalidArguments("Expected <value> argument for 'set' command".to_string())
        })?;

        let field: SettingField = name.parse().map_err(|_| {
            CliError::InvalidArguments(format!(
                "Unknown settings field '{name}', expected one of: {}",
                field_names()
            ))
        })?;

        let mut config = self.config_store.load().await;
        config.apply(field, value);
        let stored = config.value_of(field);

        self.config_store.save(&config).await?;
        info!(%field, value = %stored, "Setting updated from CLI");

        if stored == *value {
            Ok(format!("Set {field} to '{stored}'"))
        } else {
            Ok(format!("Set {field} to '{stored}' (requested '{value}')"))
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "set".to_string(),
            description: "Set a settings value".to_string(),
            category: "config".to_string(),
            args: vec![
                CommandArg {
                    name: "field".to_string(),
                    description: format!("Settings field ({})", field_names()),
                    required: true,
                    value_type: ArgType::Field,
                },
                CommandArg {
                    name: "value".to_string(),
                    description: "New value".to_string(),
                    required: true,
                    value_type: ArgType::String,
                },
            ],
            examples: vec![
                "worldclock config set backgroundColor '#000000'".to_string(),
                "worldclock config set timeFormat 12".to_string(),
                "worldclock config set dateFormat short".to_string(),
            ],
        }
    }
}

fn field_names() -> String {
    SettingField::ALL
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(", ")
}
