use crate::{
    config::SettingField,
    config_store::StorageError,
    render::{ElementId, layout},
};

/// Input delivered to the controller by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A settings control produced a new raw value
    SettingInput {
        /// Field the control edits
        field: SettingField,
        /// Unvalidated value
        value: String,
    },
    /// The timezone picker selection changed
    SelectTimezone(String),
    /// Add a timezone; empty means the current picker selection
    AddTimezone(String),
    /// Remove a configured timezone
    RemoveTimezone(String),
    /// Persist the current settings
    Save,
    /// Ask to restore the defaults; a second `Reset` straight after confirms
    Reset,
    /// Answer a pending reset request with yes
    ConfirmReset,
    /// Open a panel
    OpenPanel(Panel),
    /// Close a panel
    ClosePanel(Panel),
    /// Pointer pressed on an element
    PointerDown {
        /// Element under the pointer
        target: ElementId,
    },
    /// A key was pressed
    KeyPress(KeyPress),
}

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key name, e.g. `s`, `,`, `?` or `Escape`
    pub key: String,
    /// Control held
    pub ctrl: bool,
    /// Meta/Command held
    pub meta: bool,
}

impl KeyPress {
    /// A key without modifiers.
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }

    /// A key with Control held.
    pub fn ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    /// Whether Control or Meta is held.
    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// The two overlay panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Settings panel
    Settings,
    /// About panel
    About,
}

impl Panel {
    /// Both panels.
    pub const ALL: [Panel; 2] = [Panel::Settings, Panel::About];

    /// The panel element.
    pub fn element(self) -> &'static str {
        match self {
            Panel::Settings => layout::CONFIG_PANEL,
            Panel::About => layout::ABOUT_POPUP,
        }
    }

    /// The button that opens the panel.
    pub fn button(self) -> &'static str {
        match self {
            Panel::Settings => layout::SETTINGS_BUTTON,
            Panel::About => layout::ABOUT_BUTTON,
        }
    }

    /// The close button inside the panel.
    pub fn close_button(self) -> &'static str {
        match self {
            Panel::Settings => layout::CLOSE_CONFIG,
            Panel::About => layout::CLOSE_ABOUT,
        }
    }
}

/// Why a save was started; decides the confirmation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// Explicit save
    Save,
    /// Save following a reset to defaults
    Reset,
}

/// Completion of a spawned save.
#[derive(Debug)]
pub struct SaveOutcome {
    /// What triggered the save
    pub kind: SaveKind,
    /// Backend result
    pub result: Result<(), StorageError>,
}
