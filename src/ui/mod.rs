//! Input handling and the single event loop driving the display.
//!
//! [`UiController`] holds the settings being edited, the panels' state and
//! the clock engine, and reacts to [`UiEvent`]s. [`App`] wires it to a
//! surface, a settings store and the timer, frame, save and notification
//! channels, all served by one task.

mod app;
mod controller;
mod events;
mod input;
mod state;


pub use app::{App, AppHandle};
pub use controller::{Effect, NOTIFICATION_TIMEOUT, NotificationKind, UiController};
pub use events::{KeyPress, Panel, SaveKind, SaveOutcome, UiEvent};
pub use input::{INPUT_HELP, InputLine, parse_input_line};
pub use state::{PanelState, UiState};
