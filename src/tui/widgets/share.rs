//! Share text overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::modal::{centered_fixed, modal_block};
use crate::tui::theme;

pub struct ShareOverlay<'a> {
    text: &'a str,
}

impl<'a> ShareOverlay<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for ShareOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_fixed(64, 14, area);
        Clear.render(modal, buf);
        let block = modal_block("Share Recipe");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut lines: Vec<Line> = self.text.lines().map(Line::raw).collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled("Copy the text above. Any key closes.", theme::dim()));
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
