//! Built-in command categories.

pub mod clock;
pub mod config;
pub mod timezone;
