use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    clock::{ClockEngine, ClockTick},
    config::{Config, SettingField, validation::sanitize_element_key},
    formatting::{TimezoneCatalog, zone_display_name},
    render::{ElementId, Mutation, RenderBatcher, Surface, layout},
};

use super::{KeyPress, Panel, SaveKind, SaveOutcome, UiEvent, UiState};

/// How long a notification stays on screen.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(4);

const SAVE_LABEL: &str = "Save";
const SAVING_LABEL: &str = "Saving...";
const SAVED_MESSAGE: &str = "Configuration saved successfully!";
const RESET_MESSAGE: &str = "Settings reset to default!";
const RESET_CONFIRM_MESSAGE: &str = "Reset all settings to default? Press reset again to confirm.";
const SAVE_FAILED_MESSAGE: &str = "Failed to save configuration";
const PICKER_PLACEHOLDER: &str = "Select timezone...";

/// Work the controller cannot do synchronously; carried out by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist `config`, then report back with a [`SaveOutcome`]
    Persist {
        /// Snapshot to store
        config: Config,
        /// What triggered the save
        kind: SaveKind,
    },
    /// Report back after `after` that notification `generation` expired
    ExpireNotification {
        /// Notification to hide
        generation: u64,
        /// Delay before hiding
        after: Duration,
    },
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Confirmation, announced politely
    Success,
    /// Question awaiting an answer, announced politely
    Prompt,
    /// Failure, announced immediately
    Error,
}

impl NotificationKind {
    /// ARIA role of the toast.
    pub fn role(self) -> &'static str {
        match self {
            NotificationKind::Success | NotificationKind::Prompt => "status",
            NotificationKind::Error => "alert",
        }
    }
}

/// Turns input events into settings changes, clock changes and page updates.
///
/// Owns the UI state, the clock engine and the render batcher. Every page
/// change is queued on the batcher; the host flushes it once per frame.
pub struct UiController {
    state: UiState,
    engine: ClockEngine,
    batcher: RenderBatcher,
    catalog: TimezoneCatalog,
}

impl UiController {
    /// Creates a controller editing `config`.
    pub fn new(
        config: Config,
        engine: ClockEngine,
        batcher: RenderBatcher,
        catalog: TimezoneCatalog,
    ) -> Self {
        Self {
            state: UiState::new(config),
            engine,
            batcher,
            catalog,
        }
    }

    /// Builds the page, applies the settings and starts every clock.
    pub fn mount(&mut self, current_year: i32) {
        self.batcher.enqueue_all(layout::page_skeleton());
        self.populate_timezone_picker();
        self.apply_config();
        self.batcher
            .enqueue(Mutation::text(layout::CURRENT_YEAR, current_year.to_string()));
        self.engine.start_all(&self.state.config, &mut self.batcher);

        info!(
            timezones = self.state.config.additional_timezones.len(),
            "Mounted world clock"
        );
    }

    /// Handles one input event.
    ///
    /// `surface` answers ancestry queries for pointer events. A pending reset
    /// request only survives until the next event.
    pub fn handle(&mut self, event: UiEvent, surface: &dyn Surface) -> Vec<Effect> {
        debug!(?event, "Handling input");
        let reset_requested = std::mem::take(&mut self.state.reset_pending);

        match event {
            UiEvent::SettingInput { field, value } => {
                self.on_setting_input(field, &value);
                Vec::new()
            }
            UiEvent::SelectTimezone(zone) => {
                self.batcher
                    .enqueue(Mutation::attribute(layout::TIMEZONE_SELECT, "value", zone.as_str()));
                self.state.selected_timezone = zone;
                Vec::new()
            }
            UiEvent::AddTimezone(zone) => {
                self.add_timezone(&zone);
                Vec::new()
            }
            UiEvent::RemoveTimezone(zone) => {
                self.remove_timezone(&zone);
                Vec::new()
            }
            UiEvent::Save => self.save(SaveKind::Save),
            UiEvent::Reset => self.request_reset(reset_requested),
            UiEvent::ConfirmReset => {
                if reset_requested {
                    self.reset()
                } else {
                    debug!("No reset awaiting confirmation");
                    Vec::new()
                }
            }
            UiEvent::OpenPanel(panel) => {
                self.open_panel(panel, ElementId::from(panel.button()));
                Vec::new()
            }
            UiEvent::ClosePanel(panel) => {
                self.close_panel(panel);
                Vec::new()
            }
            UiEvent::PointerDown { target } => {
                self.on_pointer_down(&target, surface, reset_requested)
            }
            UiEvent::KeyPress(key) => self.on_key_press(&key),
        }
    }

    /// Renders the clock a timer tick belongs to.
    pub fn on_tick(&mut self, tick: &ClockTick) {
        self.engine.on_tick(tick, &mut self.batcher);
    }

    /// Finishes a save started by an [`Effect::Persist`].
    pub fn on_save_finished(&mut self, outcome: SaveOutcome) -> Vec<Effect> {
        self.state.saves_in_flight = self.state.saves_in_flight.saturating_sub(1);
        if !self.state.is_saving() {
            self.set_save_loading(false);
        }

        match outcome.result {
            Ok(()) => {
                let message = match outcome.kind {
                    SaveKind::Save => SAVED_MESSAGE,
                    SaveKind::Reset => RESET_MESSAGE,
                };
                vec![self.notify(message, NotificationKind::Success)]
            }
            Err(e) => {
                warn!(error = %e, "Failed to save settings");
                vec![self.notify(SAVE_FAILED_MESSAGE, NotificationKind::Error)]
            }
        }
    }

    /// Hides the notification if `generation` is still the latest one.
    pub fn on_notification_expired(&mut self, generation: u64) {
        if generation != self.state.notification_generation || !self.state.notification_visible {
            return;
        }

        self.state.notification_visible = false;
        self.batcher
            .enqueue(Mutation::class(layout::NOTIFICATION, "visible", false));
    }

    /// Queues a notification and returns the effect that will expire it.
    pub fn notify(&mut self, message: &str, kind: NotificationKind) -> Effect {
        self.state.notification_generation += 1;
        self.state.notification_visible = true;

        self.batcher.enqueue_all([
            Mutation::text(layout::NOTIFICATION, message),
            Mutation::attribute(layout::NOTIFICATION, "role", kind.role()),
            Mutation::attribute(layout::NOTIFICATION, "aria-live", "polite"),
            Mutation::class(layout::NOTIFICATION, "error", kind == NotificationKind::Error),
            Mutation::class(layout::NOTIFICATION, "visible", true),
        ]);

        Effect::ExpireNotification {
            generation: self.state.notification_generation,
            after: NOTIFICATION_TIMEOUT,
        }
    }

    /// Applies every queued page change to `surface`.
    pub fn flush(&mut self, surface: &mut dyn Surface) -> usize {
        self.batcher.flush(surface)
    }

    /// Stops every clock and drops queued page changes.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
        self.batcher.discard();
    }

    /// Current UI state.
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Settings being edited.
    pub fn config(&self) -> &Config {
        &self.state.config
    }

    /// The clock engine.
    pub fn engine(&self) -> &ClockEngine {
        &self.engine
    }

    /// The render batcher.
    pub fn batcher(&self) -> &RenderBatcher {
        &self.batcher
    }

    fn on_setting_input(&mut self, field: SettingField, value: &str) {
        let changed = self.state.config.apply(field, value);
        self.apply_field(field);

        if changed && field.restarts_clocks() {
            self.engine.restart_all(&self.state.config, &mut self.batcher);
        }
    }

    fn add_timezone(&mut self, raw: &str) {
        let raw = if raw.is_empty() {
            self.state.selected_timezone.clone()
        } else {
            raw.to_string()
        };

        if self
            .engine
            .add_timezone(&mut self.state.config, &raw, &mut self.batcher)
            .is_some()
        {
            self.refresh_timezone_list();
            self.state.selected_timezone.clear();
            self.batcher
                .enqueue(Mutation::attribute(layout::TIMEZONE_SELECT, "value", ""));
        }
    }

    fn remove_timezone(&mut self, zone: &str) {
        if self
            .engine
            .remove_timezone(&mut self.state.config, zone, &mut self.batcher)
        {
            self.refresh_timezone_list();
        }
    }

    fn save(&mut self, kind: SaveKind) -> Vec<Effect> {
        self.state.saves_in_flight += 1;
        self.set_save_loading(true);

        vec![Effect::Persist {
            config: self.state.config.clone(),
            kind,
        }]
    }

    fn request_reset(&mut self, already_requested: bool) -> Vec<Effect> {
        if already_requested {
            return self.reset();
        }

        self.state.reset_pending = true;
        vec![self.notify(RESET_CONFIRM_MESSAGE, NotificationKind::Prompt)]
    }

    fn reset(&mut self) -> Vec<Effect> {
        info!("Resetting settings to defaults");

        self.state.config = Config::default();
        self.apply_config();
        self.engine.restart_all(&self.state.config, &mut self.batcher);
        self.save(SaveKind::Reset)
    }

    fn on_pointer_down(
        &mut self,
        target: &ElementId,
        surface: &dyn Surface,
        reset_requested: bool,
    ) -> Vec<Effect> {
        if let Some(zone) = self.state.remove_buttons.get(target).cloned() {
            self.remove_timezone(&zone);
            return Vec::new();
        }

        match target.as_str() {
            layout::SETTINGS_BUTTON => self.open_panel(Panel::Settings, target.clone()),
            layout::ABOUT_BUTTON => self.open_panel(Panel::About, target.clone()),
            layout::CLOSE_CONFIG => self.close_panel(Panel::Settings),
            layout::CLOSE_ABOUT => self.close_panel(Panel::About),
            layout::ADD_TIMEZONE_BUTTON => self.add_timezone(""),
            layout::SAVE_BUTTON => return self.save(SaveKind::Save),
            layout::RESET_BUTTON => return self.request_reset(reset_requested),
            _ => {}
        }

        let settings = Panel::Settings;
        if self.state.settings.open
            && target.as_str() != settings.button()
            && !surface.is_within(target, &ElementId::from(settings.element()))
        {
            self.close_panel(settings);
        }

        let about = Panel::About;
        let on_backdrop = target.as_str() == about.element();
        let outside = target.as_str() != about.button()
            && !surface.is_within(target, &ElementId::from(about.element()));
        if self.state.about.open && (on_backdrop || outside) {
            self.close_panel(about);
        }

        Vec::new()
    }

    fn on_key_press(&mut self, key: &KeyPress) -> Vec<Effect> {
        if key.has_command_modifier() {
            match key.key.as_str() {
                "s" | "S" if self.state.settings.open => return self.save(SaveKind::Save),
                "," => self.open_panel(Panel::Settings, ElementId::from(layout::SETTINGS_BUTTON)),
                _ => {}
            }
            return Vec::new();
        }

        match key.key.as_str() {
            "Escape" => {
                for panel in Panel::ALL {
                    if self.state.panel(panel).open {
                        self.close_panel(panel);
                    }
                }
            }
            "?" => self.open_panel(Panel::About, ElementId::from(layout::ABOUT_BUTTON)),
            _ => {}
        }

        Vec::new()
    }

    fn open_panel(&mut self, panel: Panel, opener: ElementId) {
        let state = self.state.panel_mut(panel);
        if state.open {
            return;
        }
        state.open = true;
        state.opener = Some(opener);

        self.batcher.enqueue_all([
            Mutation::class(panel.element(), "open", true),
            Mutation::attribute(panel.element(), "aria-hidden", "false"),
            Mutation::attribute(panel.button(), "aria-expanded", "true"),
            Mutation::Focus {
                id: ElementId::from(panel.close_button()),
            },
        ]);
        debug!(?panel, "Opened panel");
    }

    fn close_panel(&mut self, panel: Panel) {
        let state = self.state.panel_mut(panel);
        if !state.open {
            return;
        }
        state.open = false;
        let opener = state
            .opener
            .take()
            .unwrap_or_else(|| ElementId::from(panel.button()));

        self.batcher.enqueue_all([
            Mutation::class(panel.element(), "open", false),
            Mutation::attribute(panel.element(), "aria-hidden", "true"),
            Mutation::attribute(panel.button(), "aria-expanded", "false"),
            Mutation::Focus { id: opener },
        ]);
        debug!(?panel, "Closed panel");
    }

    fn set_save_loading(&mut self, loading: bool) {
        let (label, disabled) = if loading {
            (SAVING_LABEL, Mutation::attribute(layout::SAVE_BUTTON, "disabled", "true"))
        } else {
            (
                SAVE_LABEL,
                Mutation::RemoveAttribute {
                    id: ElementId::from(layout::SAVE_BUTTON),
                    name: String::from("disabled"),
                },
            )
        };

        self.batcher.enqueue_all([
            Mutation::class(layout::SAVE_BUTTON, "loading", loading),
            Mutation::text(layout::SAVE_BUTTON, label),
            disabled,
        ]);
    }

    fn apply_config(&mut self) {
        for field in SettingField::ALL {
            self.apply_field(field);
        }
        self.refresh_timezone_list();
    }

    fn apply_field(&mut self, field: SettingField) {
        let config = &self.state.config;
        let value = config.value_of(field);

        let mutations = match field {
            SettingField::BackgroundColor => vec![
                Mutation::style(layout::BODY, "background-color", value.as_str()),
                Mutation::attribute(layout::BG_COLOR_INPUT, "value", value),
            ],
            SettingField::FontColor => vec![
                Mutation::style(layout::BODY, "color", value.as_str()),
                Mutation::attribute(layout::FONT_COLOR_INPUT, "value", value),
            ],
            SettingField::FontFamily => vec![
                Mutation::style(layout::BODY, "font-family", value.as_str()),
                Mutation::attribute(layout::FONT_FAMILY_INPUT, "value", value),
            ],
            SettingField::FontSize => {
                let size = config.font_size;
                vec![
                    Mutation::style(layout::BODY, "font-size", format!("{size}px")),
                    Mutation::attribute(layout::FONT_SIZE_INPUT, "value", value.as_str()),
                    Mutation::attribute(layout::FONT_SIZE_INPUT, "aria-valuenow", value),
                    Mutation::attribute(
                        layout::FONT_SIZE_INPUT,
                        "aria-valuetext",
                        format!("{size} pixels"),
                    ),
                    Mutation::text(layout::FONT_SIZE_VALUE, format!("{size}px")),
                ]
            }
            SettingField::TimeFormat => {
                vec![Mutation::attribute(layout::TIME_FORMAT_INPUT, "value", value)]
            }
            SettingField::DateFormat => {
                vec![Mutation::attribute(layout::DATE_FORMAT_INPUT, "value", value)]
            }
        };

        self.batcher.enqueue_all(mutations);
    }

    fn refresh_timezone_list(&mut self) {
        let mut mutations = vec![Mutation::ClearChildren {
            id: ElementId::from(layout::ADDED_TIMEZONES),
        }];
        self.state.remove_buttons.clear();

        for zone in &self.state.config.additional_timezones {
            let key = sanitize_element_key(zone);
            let name = zone_display_name(zone);
            let item = layout::timezone_item(&key);
            let label = format!("{item}-name");
            let button = layout::timezone_remove_button(&key);

            mutations.extend([
                Mutation::create(item.as_str(), layout::ADDED_TIMEZONES, "timezone-item"),
                Mutation::attribute(item.as_str(), "role", "listitem"),
                Mutation::attribute(item.as_str(), "aria-labelledby", label.as_str()),
                Mutation::create(label.as_str(), item.as_str(), "timezone-name"),
                Mutation::text(label.as_str(), name.as_str()),
                Mutation::attribute(label.as_str(), "aria-label", format!("Timezone: {name}")),
                Mutation::create(button.as_str(), item.as_str(), "remove-btn"),
                Mutation::text(button.as_str(), "Remove"),
                Mutation::attribute(button.as_str(), "data-timezone", zone.as_str()),
                Mutation::attribute(
                    button.as_str(),
                    "aria-label",
                    format!("Remove {name} timezone"),
                ),
                Mutation::attribute(button.as_str(), "aria-describedby", label.as_str()),
            ]);

            self.state
                .remove_buttons
                .insert(ElementId::from(button), zone.clone());
        }

        self.batcher.enqueue_all(mutations);
    }

    fn populate_timezone_picker(&mut self) {
        let picker = layout::TIMEZONE_SELECT;
        let placeholder = "option-placeholder";
        let mut mutations = vec![
            Mutation::ClearChildren {
                id: ElementId::from(picker),
            },
            Mutation::create(placeholder, picker, "option"),
            Mutation::attribute(placeholder, "value", ""),
            Mutation::text(placeholder, PICKER_PLACEHOLDER),
        ];

        for (region, options) in self.catalog.groups() {
            let group = format!("optgroup-{}", sanitize_element_key(region));
            mutations.push(Mutation::create(group.as_str(), picker, "optgroup"));
            mutations.push(Mutation::attribute(group.as_str(), "label", region));

            for option in options {
                let id = format!("option-{}", sanitize_element_key(&option.id));
                mutations.extend([
                    Mutation::create(id.as_str(), group.as_str(), "option"),
                    Mutation::attribute(id.as_str(), "value", option.id.as_str()),
                    Mutation::text(id, option.label.as_str()),
                ]);
            }
        }

        debug!(zones = self.catalog.len(), "Populated timezone picker");
        self.batcher.enqueue_all(mutations);
    }
}
