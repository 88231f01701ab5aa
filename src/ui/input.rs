use crate::config::SettingField;

use super::{KeyPress, Panel, UiEvent};

/// One line typed into the interactive display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// Deliver an event to the controller
    Event(UiEvent),
    /// Leave the display
    Quit,
}

/// Words understood by [`parse_input_line`], for the prompt.
pub const INPUT_HELP: &str = "add <zone> | remove <zone> | select <zone> | time 12|24 | \
     date short|medium|long | bg <hex> | fg <hex> | font <family> | size <px> | \
     save | reset (then yes) | settings | about | esc | quit";

/// Translates a typed line into an input event.
///
/// Returns `None` for blank lines, unknown words and missing arguments.
/// Values are passed through unvalidated; the controller validates them.
pub fn parse_input_line(line: &str) -> Option<InputLine> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let event = match (word, rest) {
        ("", _) => return None,
        ("quit" | "exit", _) => return Some(InputLine::Quit),
        ("save", _) => UiEvent::Save,
        ("reset", _) => UiEvent::Reset,
        ("yes" | "y", _) => UiEvent::ConfirmReset,
        ("settings", _) => UiEvent::OpenPanel(Panel::Settings),
        ("about", _) => UiEvent::OpenPanel(Panel::About),
        ("esc", _) => UiEvent::KeyPress(KeyPress::plain("Escape")),
        (_, "") => return None,
        ("add", zone) => UiEvent::AddTimezone(zone.to_string()),
        ("remove", zone) => UiEvent::RemoveTimezone(zone.to_string()),
        ("select", zone) => UiEvent::SelectTimezone(zone.to_string()),
        (word, value) => UiEvent::SettingInput {
            field: setting_for(word)?,
            value: value.to_string(),
        },
    };

    Some(InputLine::Event(event))
}

fn setting_for(word: &str) -> Option<SettingField> {
    match word {
        "time" => Some(SettingField::TimeFormat),
        "date" => Some(SettingField::DateFormat),
        "bg" => Some(SettingField::BackgroundColor),
        "fg" => Some(SettingField::FontColor),
        "font" => Some(SettingField::FontFamily),
        "size" => Some(SettingField::FontSize),
        _ => None,
    }
}
