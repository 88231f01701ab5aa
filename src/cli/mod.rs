//! Command-line interface for the stored settings.
//!
//! Provides a hierarchical command system for inspecting and editing the
//! persisted world clock settings without starting the display. Commands
//! are organized by category and generate their help text from metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use commands::{
    clock::{ShowCommand, describe_clocks},
    config::{GetCommand, ResetCommand, SchemaCommand, SetCommand},
    timezone::{AddCommand, AvailableCommand, ListCommand, RemoveCommand},
};
pub use registry::CommandRegistry;
pub use service::{CliService, HELP_CATEGORY};
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};
