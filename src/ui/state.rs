use std::collections::HashMap;

use crate::{config::Config, render::ElementId};

use super::Panel;

/// Open state of one panel and the control focus returns to on close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    /// Whether the panel is shown
    pub open: bool,
    /// Control that opened the panel
    pub opener: Option<ElementId>,
}

/// Everything the controller knows about the page besides the clocks.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Settings being edited; persisted only on save or reset
    pub config: Config,
    /// Settings panel
    pub settings: PanelState,
    /// About panel
    pub about: PanelState,
    /// Current timezone picker value
    pub selected_timezone: String,
    /// Remove buttons of the added-timezones list, by element id
    pub remove_buttons: HashMap<ElementId, String>,
    /// Saves started and not yet finished
    pub saves_in_flight: usize,
    /// Bumped on every notification; expiries of older ones are ignored
    pub notification_generation: u64,
    /// Whether the notification toast is shown
    pub notification_visible: bool,
    /// A reset was requested by the previous event and awaits confirmation
    pub reset_pending: bool,
}

impl UiState {
    /// Fresh state around `config`.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// State of `panel`.
    pub fn panel(&self, panel: Panel) -> &PanelState {
        match panel {
            Panel::Settings => &self.settings,
            Panel::About => &self.about,
        }
    }

    /// Mutable state of `panel`.
    pub fn panel_mut(&mut self, panel: Panel) -> &mut PanelState {
        match panel {
            Panel::Settings => &mut self.settings,
            Panel::About => &mut self.about,
        }
    }

    /// Whether a save is running.
    pub fn is_saving(&self) -> bool {
        self.saves_in_flight > 0
    }
}
