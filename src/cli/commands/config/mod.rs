//! Settings management commands.
mod get;
mod reset;
mod schema;
mod set;

pub use get::GetCommand;
pub use reset::ResetCommand;
pub use schema::SchemaCommand;
pub use set::SetCommand;

use crate::{cli::CommandRegistry, config_store::ConfigStore};

/// Registers all settings commands with the command registry.
///
/// Registers commands in the "config" category for reading, editing and
/// resetting the persisted settings and for printing their schema.
pub fn register_commands(registry: &mut CommandRegistry, config_store: &ConfigStore) {
    const CATEGORY_NAME: &str = "config";

    registry.register_command(
        CATEGORY_NAME,
        Box::new(GetCommand::new(config_store.clone())),
    );

    registry.register_command(
        CATEGORY_NAME,
        Box::new(SetCommand::new(config_store.clone())),
    );

    registry.register_command(
        CATEGORY_NAME,
        Box::new(ResetCommand::new(config_store.clone())),
    );

    registry.register_command(CATEGORY_NAME, Box::new(SchemaCommand));
}
