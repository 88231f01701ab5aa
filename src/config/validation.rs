//! Normalisation of user-supplied settings values.
//!
//! Every validator returns a usable value: invalid input is replaced by a
//! fallback instead of being reported as an error.

use std::sync::LazyLock;

use regex::Regex;

use super::{DateFormat, TimeFormat};

/// Smallest accepted font size in pixels.
pub const MIN_FONT_SIZE: u32 = 12;
/// Largest accepted font size in pixels.
pub const MAX_FONT_SIZE: u32 = 48;
/// Font size used when the input is out of range or not a number.
pub const DEFAULT_FONT_SIZE: u32 = 16;
/// Longest timezone identifier kept after sanitisation.
pub const MAX_TIMEZONE_LEN: usize = 50;

#[allow(clippy::expect_used)]
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex colour pattern is valid")
});

/// Returns `input` if it is a `#RGB` or `#RRGGBB` colour, otherwise `fallback`.
///
/// Callers pass the last-known-good value of the field being edited, so a bad
/// keystroke never wipes a colour the user already chose.
pub fn validate_color(input: &str, fallback: &str) -> String {
    if HEX_COLOR.is_match(input) {
        input.to_string()
    } else {
        fallback.to_string()
    }
}

/// Parses a font size, keeping it only when it lies in `[12, 48]`.
///
/// Only the leading integer is read, so `"20px"` is 20 and `"12.5"` is 12.
pub fn validate_font_size(input: &str) -> u32 {
    match leading_integer(input) {
        Some(size) => font_size_in_range(size),
        None => DEFAULT_FONT_SIZE,
    }
}

/// Returns `size` when it lies in `[12, 48]`, otherwise the default size.
pub fn font_size_in_range(size: i64) -> u32 {
    if (i64::from(MIN_FONT_SIZE)..=i64::from(MAX_FONT_SIZE)).contains(&size) {
        size as u32
    } else {
        DEFAULT_FONT_SIZE
    }
}

/// Optional sign followed by ASCII digits, after leading whitespace.
///
/// Anything after the digits is ignored. Values too large for `i64` saturate,
/// which keeps them out of range.
fn leading_integer(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// `"12"` or `"24"`; anything else is the 24-hour clock.
pub fn validate_time_format(input: &str) -> TimeFormat {
    input.parse().unwrap_or_default()
}

/// `short`, `medium` or `long`; anything else is `long`.
pub fn validate_date_format(input: &str) -> DateFormat {
    input.parse().unwrap_or_default()
}

/// Strips every character outside `[A-Za-z0-9_/-]` and truncates to 50 chars.
///
/// The result is not checked against the timezone database; an unknown zone
/// surfaces later as a format failure on the clock that uses it.
pub fn sanitize_timezone_id(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '-'))
        .take(MAX_TIMEZONE_LEN)
        .collect()
}

/// Maps every character outside `[A-Za-z0-9_-]` to `-` for use in element ids.
///
/// Distinct inputs can collide (`America/New_York` and `America-New_York`).
pub fn sanitize_element_key(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
