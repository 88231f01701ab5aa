use std::collections::HashMap;

use crate::config_store::ConfigStore;

use super::{
    CliError, Command,
    commands::{clock, config, timezone},
    types::CommandMetadata,
};

/// Registry for CLI commands organized by category.
///
/// Commands are grouped by category so that `worldclock <category> <command>`
/// resolves with two map lookups instead of a growing match statement.
///
/// # Example Structure
///
/// ```text
/// registry
/// ├── clock
/// │   └── show
/// ├── config
/// │   ├── get
/// │   ├── reset
/// │   ├── schema
/// │   └── set
/// └── timezone
///     ├── add
///     ├── available
///     ├── list
///     └── remove
/// ```
pub struct CommandRegistry {
    /// Nested HashMap structure: category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
    config_store: ConfigStore,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    ///
    /// Commands must be added with [`CommandRegistry::register_command`] or
    /// [`CommandRegistry::register_all_commands`].
    pub fn new(config_store: ConfigStore) -> Self {
        let categories = HashMap::new();
        Self {
            categories,
            config_store,
        }
    }

    /// Registers a command in the specified category.
    ///
    /// The command's metadata name is its key within the category; a command
    /// with the same name replaces the previous one.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or the command
    /// within it doesn't exist, and `CliError::InvalidArguments` if the
    /// argument count does not match the command's metadata. Other errors
    /// come from the command itself.
    pub async fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find command '{command_name}'"))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args).await
    }

    /// Lists all registered commands organized by category.
    ///
    /// Categories and commands are sorted alphabetically.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        let mut categories: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut command_list: Vec<String> = commands.keys().cloned().collect();
                command_list.sort();

                (category.clone(), command_list)
            })
            .collect();

        categories.sort();

        categories
    }

    /// Metadata of every command in `category`, sorted by name.
    pub fn category_metadata(&self, category: &str) -> Option<Vec<CommandMetadata>> {
        let commands = self.categories.get(category)?;
        let mut metadata: Vec<CommandMetadata> =
            commands.values().map(|command| command.metadata()).collect();
        metadata.sort_by(|a, b| a.name.cmp(&b.name));

        Some(metadata)
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers all available CLI commands in their respective categories.
    pub fn register_all_commands(&mut self) {
        let config_store = self.config_store.clone();
        config::register_commands(self, &config_store);
        timezone::register_commands(self, &config_store);
        clock::register_commands(self, &config_store);
    }
}
