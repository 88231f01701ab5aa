//! Persistence of the settings record.
//!
//! The whole [`Config`](crate::config::Config) is stored as one JSON value
//! under [`SETTINGS_KEY`] in a [`SettingsStorage`] backend. Loading never
//! fails outward; saving reports errors to the caller.

mod error;
mod storage;
mod store;

#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use storage::{FileStorage, MemoryStorage, SettingsStorage};
pub use store::{ConfigStore, SETTINGS_KEY};
