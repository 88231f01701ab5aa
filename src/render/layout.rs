//! Identifiers of the page's fixed elements and the page skeleton.

use super::Mutation;

/// Page root; carries the colour and font styles.
pub const BODY: &str = "body";
/// Local clock time slot.
pub const MAIN_TIME: &str = "mainTime";
/// Local clock date slot.
pub const MAIN_DATE: &str = "mainDate";
/// Local clock zone label slot.
pub const MAIN_TIMEZONE: &str = "mainTimezone";
/// Container for additional clock views.
pub const ADDITIONAL_CLOCKS: &str = "additionalClocks";

/// Button opening the settings panel.
pub const SETTINGS_BUTTON: &str = "settingsBtn";
/// Settings panel.
pub const CONFIG_PANEL: &str = "configPanel";
/// Close button inside the settings panel.
pub const CLOSE_CONFIG: &str = "closeConfig";
/// Background colour input.
pub const BG_COLOR_INPUT: &str = "bgColor";
/// Font colour input.
pub const FONT_COLOR_INPUT: &str = "fontColor";
/// Font family select.
pub const FONT_FAMILY_INPUT: &str = "fontFamily";
/// Font size slider.
pub const FONT_SIZE_INPUT: &str = "fontSize";
/// Label echoing the font size.
pub const FONT_SIZE_VALUE: &str = "fontSizeValue";
/// Time format select.
pub const TIME_FORMAT_INPUT: &str = "timeFormat";
/// Date format select.
pub const DATE_FORMAT_INPUT: &str = "dateFormat";
/// Timezone picker.
pub const TIMEZONE_SELECT: &str = "timezoneSelect";
/// Button adding the picked timezone.
pub const ADD_TIMEZONE_BUTTON: &str = "addTimezone";
/// List of added timezones with remove buttons.
pub const ADDED_TIMEZONES: &str = "addedTimezones";
/// Save button.
pub const SAVE_BUTTON: &str = "saveConfig";
/// Reset button.
pub const RESET_BUTTON: &str = "resetConfig";

/// Button opening the about panel.
pub const ABOUT_BUTTON: &str = "aboutBtn";
/// About panel, doubling as its own backdrop.
pub const ABOUT_POPUP: &str = "aboutPopup";
/// Close button inside the about panel.
pub const CLOSE_ABOUT: &str = "closeAbout";
/// Copyright year slot.
pub const CURRENT_YEAR: &str = "currentYear";

/// Transient notification toast.
pub const NOTIFICATION: &str = "notification";

/// Element id of the view for an additional clock.
pub fn clock_view(key: &str) -> String {
    format!("clock-{key}")
}

/// Element id of one text slot (`time`, `date` or `timezone`) of a clock view.
pub fn clock_slot(key: &str, slot: &str) -> String {
    format!("clock-{key}-{slot}")
}

/// Element id of an entry in the added-timezones list.
pub fn timezone_item(key: &str) -> String {
    format!("timezone-{key}")
}

/// Element id of the remove button of an added-timezones entry.
pub fn timezone_remove_button(key: &str) -> String {
    format!("remove-{key}")
}

/// Mutations that build the fixed page skeleton.
pub fn page_skeleton() -> Vec<Mutation> {
    let mut page = vec![
        Mutation::create("clock", BODY, "main-clock"),
        Mutation::create(MAIN_TIME, "clock", "time"),
        Mutation::create(MAIN_DATE, "clock", "date"),
        Mutation::create(MAIN_TIMEZONE, "clock", "timezone"),
        Mutation::create(ADDITIONAL_CLOCKS, BODY, "additional-clocks"),
        Mutation::create(SETTINGS_BUTTON, BODY, "settings-btn"),
        Mutation::create(ABOUT_BUTTON, BODY, "about-btn"),
        Mutation::create(CONFIG_PANEL, BODY, "config-panel"),
        Mutation::create(ABOUT_POPUP, BODY, "about-popup"),
        Mutation::create("aboutContent", ABOUT_POPUP, "about-content"),
        Mutation::create(CLOSE_ABOUT, "aboutContent", "close-btn"),
        Mutation::create(CURRENT_YEAR, "aboutContent", "year"),
        Mutation::create(NOTIFICATION, BODY, "notification-toast"),
    ];

    for (id, class) in [
        (CLOSE_CONFIG, "close-btn"),
        (BG_COLOR_INPUT, "color-input"),
        (FONT_COLOR_INPUT, "color-input"),
        (FONT_FAMILY_INPUT, "select"),
        (FONT_SIZE_INPUT, "slider"),
        (FONT_SIZE_VALUE, "slider-value"),
        (TIME_FORMAT_INPUT, "select"),
        (DATE_FORMAT_INPUT, "select"),
        (TIMEZONE_SELECT, "select"),
        (ADD_TIMEZONE_BUTTON, "button"),
        (ADDED_TIMEZONES, "timezone-list"),
        (SAVE_BUTTON, "button primary"),
        (RESET_BUTTON, "button"),
    ] {
        page.push(Mutation::create(id, CONFIG_PANEL, class));
    }

    page.extend([
        Mutation::attribute(CONFIG_PANEL, "aria-hidden", "true"),
        Mutation::attribute(ABOUT_POPUP, "aria-hidden", "true"),
        Mutation::attribute(SETTINGS_BUTTON, "aria-expanded", "false"),
        Mutation::attribute(ABOUT_BUTTON, "aria-expanded", "false"),
        Mutation::attribute(ADDED_TIMEZONES, "role", "list"),
        Mutation::text(SAVE_BUTTON, "Save"),
        Mutation::text(ADD_TIMEZONE_BUTTON, "Add"),
    ]);

    page
}
