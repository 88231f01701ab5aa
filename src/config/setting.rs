use std::{fmt, str::FromStr};

use super::{Config, UnknownVariant, validation};

/// A scalar settings field addressable by its stored (camelCase) name.
///
/// `additionalTimezones` is not listed: the list is edited through
/// [`Config::push_timezone`] and [`Config::remove_timezone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    /// `backgroundColor`
    BackgroundColor,
    /// `fontColor`
    FontColor,
    /// `fontFamily`
    FontFamily,
    /// `fontSize`
    FontSize,
    /// `timeFormat`
    TimeFormat,
    /// `dateFormat`
    DateFormat,
}

impl SettingField {
    /// Every scalar field, in display order.
    pub const ALL: [SettingField; 6] = [
        SettingField::BackgroundColor,
        SettingField::FontColor,
        SettingField::FontFamily,
        SettingField::FontSize,
        SettingField::TimeFormat,
        SettingField::DateFormat,
    ];

    /// Stored field name.
    pub fn name(self) -> &'static str {
        match self {
            SettingField::BackgroundColor => "backgroundColor",
            SettingField::FontColor => "fontColor",
            SettingField::FontFamily => "fontFamily",
            SettingField::FontSize => "fontSize",
            SettingField::TimeFormat => "timeFormat",
            SettingField::DateFormat => "dateFormat",
        }
    }

    /// Whether a change to this field invalidates every running clock.
    pub fn restarts_clocks(self) -> bool {
        matches!(self, SettingField::TimeFormat | SettingField::DateFormat)
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl Config {
    /// Validates `raw` for `field` and stores the result.
    ///
    /// Returns `true` when the stored value changed.
    pub fn apply(&mut self, field: SettingField, raw: &str) -> bool {
        let before = self.value_of(field);

        match field {
            SettingField::BackgroundColor => {
                self.background_color = validation::validate_color(raw, &self.background_color);
            }
            SettingField::FontColor => {
                self.font_color = validation::validate_color(raw, &self.font_color);
            }
            SettingField::FontFamily => self.font_family = raw.to_string(),
            SettingField::FontSize => self.font_size = validation::validate_font_size(raw),
            SettingField::TimeFormat => self.time_format = validation::validate_time_format(raw),
            SettingField::DateFormat => self.date_format = validation::validate_date_format(raw),
        }

        before != self.value_of(field)
    }

    /// Current value of `field` in its stored string form.
    pub fn value_of(&self, field: SettingField) -> String {
        match field {
            SettingField::BackgroundColor => self.background_color.clone(),
            SettingField::FontColor => self.font_color.clone(),
            SettingField::FontFamily => self.font_family.clone(),
            SettingField::FontSize => self.font_size.to_string(),
            SettingField::TimeFormat => self.time_format.to_string(),
            SettingField::DateFormat => self.date_format.to_string(),
        }
    }
}
