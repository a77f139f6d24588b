//! Step-by-step cooking overlay

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Gauge, Paragraph, Widget, Wrap},
};

use super::modal::{centered_rect, modal_block};
use crate::recipe::Recipe;
use crate::tui::theme;

pub struct CookingMode<'a> {
    recipe: &'a Recipe,
    step: usize,
}

impl<'a> CookingMode<'a> {
    pub fn new(recipe: &'a Recipe, step: usize) -> Self {
        Self { recipe, step }
    }
}

impl Widget for CookingMode<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(80, 70, area);
        Clear.render(modal, buf);

        let block = modal_block(&self.recipe.recipe_name);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let total = self.recipe.cooking_steps.len();
        let step = self.step.min(total.saturating_sub(1));
        let is_last = step + 1 >= total;

        let [counter, progress, body, buttons] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(format!("Step {} of {}", (step + 1).min(total.max(1)), total.max(1)))
            .style(theme::dim())
            .alignment(Alignment::Center)
            .render(counter, buf);

        let ratio = if total == 0 {
            1.0
        } else {
            (step + 1) as f64 / total as f64
        };
        Gauge::default()
            .gauge_style(Style::default().fg(theme::ACCENT))
            .ratio(ratio.clamp(0.0, 1.0))
            .label("")
            .render(progress, buf);

        let text = self
            .recipe
            .cooking_steps
            .get(step)
            .map(String::as_str)
            .unwrap_or("No steps listed for this recipe.");
        let [_, text_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body);
        Paragraph::new(text)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        let previous_style = if step == 0 { theme::dim() } else { theme::key_hint() };
        let next = if is_last {
            Span::styled(
                "[Enter] Finish",
                Style::default().fg(theme::SUCCESS).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("[->] Next", theme::key_hint())
        };
        Paragraph::new(Line::from(vec![
            Span::styled("[<-] Previous", previous_style),
            Span::raw("      "),
            next,
            Span::raw("      "),
            Span::styled("[Esc] Close", theme::dim()),
        ]))
        .alignment(Alignment::Center)
        .render(buttons, buf);
    }
}
