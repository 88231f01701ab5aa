//! Commands for the list of additional timezones.
mod add;
mod available;
mod list;
mod remove;

pub use add::AddCommand;
pub use available::AvailableCommand;
pub use list::ListCommand;
pub use remove::RemoveCommand;

use crate::{cli::CommandRegistry, config_store::ConfigStore, formatting::TimezoneCatalog};

/// Registers all timezone commands in the "timezone" category.
pub fn register_commands(registry: &mut CommandRegistry, config_store: &ConfigStore) {
    const CATEGORY_NAME: &str = "timezone";

    registry.register_command(
        CATEGORY_NAME,
        Box::new(AddCommand::new(config_store.clone())),
    );

    registry.register_command(
        CATEGORY_NAME,
        Box::new(RemoveCommand::new(config_store.clone())),
    );

    registry.register_command(
        CATEGORY_NAME,
        Box::new(ListCommand::new(config_store.clone())),
    );

    registry.register_command(
        CATEGORY_NAME,
        Box::new(AvailableCommand::new(TimezoneCatalog::load())),
    );
}
