//! Shared colors and styles

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0xF9, 0x73, 0x16);
pub const FAVORITE: Color = Color::Rgb(0xEF, 0x44, 0x44);
pub const SUCCESS: Color = Color::Green;
pub const MUTED: Color = Color::DarkGray;
pub const ERROR: Color = Color::Red;
pub const MODAL_BG: Color = Color::Rgb(0x1C, 0x1C, 0x1C);

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn dim() -> Style {
    Style::default().fg(MUTED)
}

pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Border color for a panel, brighter when it has focus.
pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}
