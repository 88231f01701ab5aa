use std::fmt::Write;

use crate::config_store::ConfigStore;

use super::{
    CliError, CommandRegistry,
    formatting::{
        format_category, format_command, format_description, format_header, format_subheader,
        format_usage,
    },
    types::CommandMetadata,
};

/// Category name that prints help instead of dispatching to the registry.
pub const HELP_CATEGORY: &str = "help";

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, and execution.
/// Commands are organized by category and can be listed or executed by name.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// Every command shares `config_store`.
    pub fn new(config_store: ConfigStore) -> Self {
        let mut registry = CommandRegistry::new(config_store);
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// The `help` category prints the command overview, or the details of
    /// one category when its name is given as the command.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist in the category.
    /// Other errors are returned by the command itself.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        if category == HELP_CATEGORY {
            return match command_name {
                "" => Ok(self.help()),
                name => self.category_help(name),
            };
        }

        if command_name.is_empty() {
            return self.category_help(category);
        }

        self.registry.execute(category, command_name, args).await
    }

    /// Lists all available commands organized by category.
    ///
    /// # Returns
    /// Vector of (category_name, command_names) tuples
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Overview of every category and its commands.
    pub fn help(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", format_header("worldclock"));
        let _ = writeln!(
            out,
            "{}\n",
            format_usage("Usage: worldclock [--settings <path>] <run | category command [args]>")
        );
        let _ = writeln!(
            out,
            "  {}  {}",
            format_command("run"),
            format_description("Start the interactive clock display")
        );

        for (category, commands) in self.list_all() {
            let _ = writeln!(out, "\n{}", format_category(&category));
            for command in commands {
                let _ = writeln!(out, "  {}", format_command(&command));
            }
        }

        let _ = write!(
            out,
            "\n{}",
            format_usage("Run 'worldclock help <category>' for details")
        );
        out
    }

    /// Details of every command in `category`.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the category doesn't exist.
    pub fn category_help(&self, category: &str) -> Result<String, CliError> {
        let commands = self.registry.category_metadata(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let mut out = format_header(category);
        for metadata in &commands {
            out.push('\n');
            out.push_str(&describe_command(metadata));
        }

        Ok(out)
    }
}

fn describe_command(metadata: &CommandMetadata) -> String {
    let mut out = String::new();
    let usage: Vec<String> = metadata
        .args
        .iter()
        .map(|arg| {
            if arg.required {
                format!("<{}>", arg.name)
            } else {
                format!("[{}]", arg.name)
            }
        })
        .collect();

    let _ = writeln!(
        out,
        "\n  {} {}  {}",
        format_command(&metadata.name),
        usage.join(" "),
        format_description(&metadata.description)
    );

    for arg in &metadata.args {
        let _ = writeln!(
            out,
            "      {} ({}): {}",
            format_subheader(&arg.name),
            arg.value_type.hint(),
            arg.description
        );
    }

    for example in &metadata.examples {
        let _ = writeln!(out, "      {}", format_usage(example));
    }

    out.truncate(out.trim_end().len());
    out
}
