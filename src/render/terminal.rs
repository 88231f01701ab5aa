use std::io::{self, Write};

use tracing::warn;

use super::{ElementId, MemorySurface, Surface, layout};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Draws the page to a terminal after every flushed batch.
///
/// Elements live in an inner [`MemorySurface`]; presenting redraws the
/// whole screen from it using the body's colours.
pub struct TerminalSurface {
    page: MemorySurface,
    out: Box<dyn Write + Send>,
}

impl TerminalSurface {
    /// A terminal surface writing to stdout.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// A terminal surface writing to `out`.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            page: MemorySurface::page(),
            out,
        }
    }

    /// The element tree being drawn.
    pub fn page(&self) -> &MemorySurface {
        &self.page
    }

    /// Renders the current page as text, colour escapes included.
    pub fn screen(&self) -> String {
        let page = &self.page;
        let mut screen = String::from(CLEAR);

        let fg = page
            .style(layout::BODY, "color")
            .and_then(hex_to_rgb)
            .map(|(r, g, b)| format!("\x1b[38;2;{r};{g};{b}m"))
            .unwrap_or_default();
        let bg = page
            .style(layout::BODY, "background-color")
            .and_then(hex_to_rgb)
            .map(|(r, g, b)| format!("\x1b[48;2;{r};{g};{b}m"))
            .unwrap_or_default();
        screen.push_str(&bg);
        screen.push_str(&fg);

        let text = |id: &str| page.text(id).unwrap_or_default().to_string();

        screen.push_str(&format!("\n  {BOLD}{}{RESET}{bg}{fg}\n", text(layout::MAIN_TIME)));
        screen.push_str(&format!("  {}\n", text(layout::MAIN_DATE)));
        screen.push_str(&format!("  {DIM}{}{RESET}{bg}{fg}\n\n", text(layout::MAIN_TIMEZONE)));

        for view in page.children(layout::ADDITIONAL_CLOCKS) {
            let slots: Vec<String> = page
                .children(view.as_str())
                .into_iter()
                .map(|slot| page.text(slot.as_str()).unwrap_or_default().to_string())
                .collect();
            screen.push_str(&format!("  {}\n", slots.join("  ")));
        }

        if page.has_class(layout::CONFIG_PANEL, "open") {
            screen.push_str(&format!("\n  {BOLD}Settings{RESET}{bg}{fg}\n"));
            for (label, id) in [
                ("background", layout::BG_COLOR_INPUT),
                ("font colour", layout::FONT_COLOR_INPUT),
                ("font", layout::FONT_FAMILY_INPUT),
                ("size", layout::FONT_SIZE_VALUE),
                ("time", layout::TIME_FORMAT_INPUT),
                ("date", layout::DATE_FORMAT_INPUT),
            ] {
                let value = page
                    .attribute(id, "value")
                    .map(str::to_string)
                    .unwrap_or_else(|| text(id));
                screen.push_str(&format!("    {label:<12} {value}\n"));
            }
        }

        if page.has_class(layout::ABOUT_POPUP, "open") {
            screen.push_str(&format!(
                "\n  worldclock {} (c) {}\n",
                env!("CARGO_PKG_VERSION"),
                text(layout::CURRENT_YEAR)
            ));
        }

        if page.has_class(layout::NOTIFICATION, "visible") {
            screen.push_str(&format!("\n  {BOLD}{}{RESET}\n", text(layout::NOTIFICATION)));
        }

        screen.push_str(RESET);
        screen
    }
}

impl Surface for TerminalSurface {
    fn contains(&self, id: &ElementId) -> bool {
        self.page.contains(id)
    }

    fn is_within(&self, id: &ElementId, ancestor: &ElementId) -> bool {
        self.page.is_within(id, ancestor)
    }

    fn create_element(&mut self, id: &ElementId, parent: &ElementId, class: &str) {
        self.page.create_element(id, parent, class);
    }

    fn remove_element(&mut self, id: &ElementId) {
        self.page.remove_element(id);
    }

    fn clear_children(&mut self, id: &ElementId) {
        self.page.clear_children(id);
    }

    fn set_text(&mut self, id: &ElementId, text: &str) {
        self.page.set_text(id, text);
    }

    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str) {
        self.page.set_attribute(id, name, value);
    }

    fn remove_attribute(&mut self, id: &ElementId, name: &str) {
        self.page.remove_attribute(id, name);
    }

    fn set_style(&mut self, id: &ElementId, property: &str, value: &str) {
        self.page.set_style(id, property, value);
    }

    fn set_class(&mut self, id: &ElementId, class: &str, enabled: bool) {
        self.page.set_class(id, class, enabled);
    }

    fn focus(&mut self, id: &ElementId) {
        self.page.focus(id);
    }

    fn present(&mut self) {
        let screen = self.screen();
        if let Err(e) = self
            .out
            .write_all(screen.as_bytes())
            .and_then(|()| self.out.flush())
        {
            warn!(error = %e, "Failed to draw terminal frame");
        }
    }
}

/// Parses `#RGB` or `#RRGGBB` into channel values.
fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').filter(|hex| hex.is_ascii())?;
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();

    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..=i].repeat(2));
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}
