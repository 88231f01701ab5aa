use async_trait::async_trait;
use thiserror::Error;

use crate::config_store::StorageError;

/// Errors that can occur during CLI command execution.
///
/// Covers everything from command lookup failures to storage errors raised
/// while a command reads or writes the persisted settings.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    ///
    /// This occurs when users specify a command that doesn't exist, either
    /// because the category is invalid or the command name is wrong within
    /// a valid category.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid arguments were provided to a command.
    ///
    /// Returned when argument validation fails: missing or surplus
    /// arguments, unknown setting names or empty timezone identifiers.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An error occurred in the configuration system.
    ///
    /// Used when a settings record cannot be converted for display or the
    /// schema cannot be rendered.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The settings backend rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for command execution results.
///
/// All CLI commands return this type: either the text to print on success
/// or a [`CliError`] describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
///
/// Drives help generation and argument count validation.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "field", "value", "timezone").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument for validation and help display.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
///
/// Shown in help text as a hint about the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A numeric value.
    Number,

    /// A settings field name.
    Field,

    /// An IANA timezone identifier or region.
    Timezone,
}

impl ArgType {
    /// Short hint shown next to the argument name in help output.
    pub fn hint(self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Number => "number",
            ArgType::Field => "field",
            ArgType::Timezone => "timezone",
        }
    }
}

/// Complete metadata for a CLI command.
///
/// Single source of truth for a command's identity, arguments, usage
/// examples and category. Used for help generation, argument validation and
/// command discovery.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "get", "add", "show").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "config", "timezone").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors and are
/// executed asynchronously since most of them go through the settings store.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against
    /// [`Command::metadata`]; the command validates the values themselves.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for any execution failure, including invalid
    /// argument values and storage errors.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
