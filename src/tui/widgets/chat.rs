//! "Ask the Chef" side panel

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::chef_chat::Speaker;
use crate::tui::state::ChatPanel;
use crate::tui::theme;

pub struct ChatPanelWidget<'a> {
    panel: &'a ChatPanel,
}

impl<'a> ChatPanelWidget<'a> {
    pub fn new(panel: &'a ChatPanel) -> Self {
        Self { panel }
    }
}

impl Widget for ChatPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = self.panel;
        let block = Block::default()
            .title(" Ask the Chef ")
            .title_style(theme::title())
            .borders(Borders::LEFT)
            .border_style(theme::dim());
        let inner = block.inner(area);
        block.render(area, buf);

        let [subtitle, transcript_area, input_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(inner);

        Paragraph::new(Line::styled(
            format!("Expert help for {}", panel.conversation.recipe_name()),
            theme::dim(),
        ))
        .render(subtitle, buf);

        let mut lines = Vec::new();
        for turn in panel.conversation.display_turns() {
            let (label, color) = match turn.speaker {
                Speaker::User => ("You", theme::ACCENT),
                Speaker::Model => ("Chef", theme::SUCCESS),
            };
            let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), style),
                Span::raw(turn.text),
            ]));
        }
        if panel.pending {
            lines.push(Line::styled("Chef is typing...", theme::dim()));
        }
        if let Some(reason) = &panel.unavailable {
            lines.push(Line::raw(""));
            for line in reason.lines() {
                lines.push(Line::styled(line.to_string(), Style::default().fg(theme::ERROR)));
            }
        }

        // Keep the latest turns in view.
        let visible = transcript_area.height as usize;
        let total = lines.len();
        let skip = total.saturating_sub(visible.max(1));
        Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
            .wrap(Wrap { trim: false })
            .render(transcript_area, buf);

        let input_line = if panel.unavailable.is_some() {
            Line::styled("Chat is unavailable", theme::dim())
        } else if panel.pending {
            Line::styled("Waiting for the chef...", theme::dim())
        } else if panel.input.is_empty() {
            Line::styled("Ask about substitutes, steps...", theme::dim())
        } else {
            Line::from(vec![
                Span::raw(panel.input.as_str()),
                Span::styled("_", theme::key_hint()),
            ])
        };
        Paragraph::new(input_line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border(panel.unavailable.is_none() && !panel.pending))
                    .title(" Enter send  Esc hide "),
            )
            .render(input_area, buf);
    }
}
