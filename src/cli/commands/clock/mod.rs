//! One-shot clock output.
mod show;

pub use show::{ShowCommand, describe_clocks};

use crate::{cli::CommandRegistry, config_store::ConfigStore};

/// Registers the "clock" category.
pub fn register_commands(registry: &mut CommandRegistry, config_store: &ConfigStore) {
    registry.register_command("clock", Box::new(ShowCommand::new(config_store.clone())));
}
