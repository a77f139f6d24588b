//! Header bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme;

/// App title plus the favorites counter
pub struct Header {
    favorites: usize,
}

impl Header {
    pub fn new(favorites: usize) -> Self {
        Self { favorites }
    }
}

impl Widget for Header {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content = Line::from(vec![
            Span::styled(" Smart Recipe AI", theme::title()),
            Span::styled("  what can I cook with what I have?", theme::dim()),
            Span::raw("   "),
            Span::styled("[", theme::dim()),
            Span::styled("f", theme::key_hint()),
            Span::styled("] ", theme::dim()),
            Span::styled(
                format!("Favorites ({})", self.favorites),
                Style::default().fg(theme::FAVORITE),
            ),
            Span::styled("  [", theme::dim()),
            Span::styled("q", theme::key_hint()),
            Span::styled("] Quit", theme::dim()),
        ]);

        Paragraph::new(content)
            .block(Block::default().borders(Borders::BOTTOM).border_style(theme::dim()))
            .render(area, buf);
    }
}
