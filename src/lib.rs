//! worldclock - a world clock display with persisted settings.
//!
//! Shows the local time and any number of additional IANA timezones, each
//! updated once per second. The main pieces are:
//!
//! - Settings validation and the persisted settings record
//! - Cached, timezone-aware time formatting
//! - A clock engine owning one timer per displayed clock
//! - Frame-batched updates of a DOM-like surface
//! - An input controller with panels, notifications and keyboard shortcuts
//! - A CLI for editing the stored settings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use worldclock::{config_store::ConfigStore, render::MemorySurface, ui::App};
//!
//! # async fn demo() {
//! let handle = App::new(ConfigStore::memory(), MemorySurface::new()).start().await;
//! // deliver input with handle.send(..)
//! handle.dispose().await;
//! # }
//! ```

/// Settings schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Persistence of the settings record.
pub mod config_store;

/// Timezone-aware formatting and the timezone catalogue.
pub mod formatting;

/// Page surface, layout and the render batcher.
pub mod render;

/// Per-clock timers and rendering.
pub mod clock;

/// Input handling and the display event loop.
pub mod ui;

/// Command-line interface for the stored settings.
pub mod cli;

/// Logging initialisation.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, WorldClockError};
