//! Right-hand panel: welcome screen, loading spinner, errors and recipe cards

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::catalog::NO_RESULTS;
use crate::error::AppError;
use crate::tui::state::{Focus, UiState};
use crate::tui::theme;

pub struct ResultsArea<'a> {
    state: &'a UiState,
}

impl<'a> ResultsArea<'a> {
    pub fn new(state: &'a UiState) -> Self {
        Self { state }
    }
}

impl Widget for ResultsArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let controller = &self.state.controller;
        let focused = self.state.focus == Focus::Results;
        let block = Block::default()
            .title(" Recipes ")
            .borders(Borders::ALL)
            .border_style(theme::border(focused));
        let mut inner = block.inner(area);
        block.render(area, buf);

        if let Some(err) = controller.error() {
            let banner = ErrorBanner::new(err);
            let height = banner.height(inner.width).min(inner.height);
            let [banner_area, rest] =
                Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(inner);
            banner.render(banner_area, buf);
            inner = rest;
        }

        if controller.is_loading() {
            Paragraph::new(vec![
                Line::raw(""),
                Line::styled(
                    format!("{} The AI chef is thinking...", self.state.spinner()),
                    theme::title(),
                ),
            ])
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        }

        if !controller.has_searched() {
            Welcome.render(inner, buf);
            return;
        }

        if controller.recipes().is_empty() {
            if controller.error().is_none() {
                Paragraph::new(NO_RESULTS)
                    .style(theme::dim())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
            }
            return;
        }

        let mut list_area = inner;
        if let Some(recommendation) = controller.recommendations() {
            let lines = vec![
                Line::styled(
                    "Smart Suggestions",
                    Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
                ),
                Line::raw(recommendation),
            ];
            let height = (wrapped_height(recommendation, inner.width.saturating_sub(2)) + 3)
                .min(inner.height);
            let [banner, rest] =
                Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(inner);
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme::ACCENT)),
                )
                .render(banner, buf);
            list_area = rest;
        }

        let items: Vec<ListItem> = controller
            .recipes()
            .iter()
            .enumerate()
            .map(|(i, recipe)| {
                let heart = if controller.is_favorite(&recipe.recipe_name) { " ♥" } else { "" };
                let image = if recipe.has_image() { "image ready" } else { "placeholder image" };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("{}. {}", i + 1, recipe.recipe_name),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(heart, Style::default().fg(theme::FAVORITE)),
                    ]),
                    Line::styled(
                        format!(
                            "   {} | {} | {}",
                            recipe.estimated_time, recipe.difficulty_level, image
                        ),
                        theme::dim(),
                    ),
                ])
            })
            .collect();

        let mut list_state = ListState::default().with_selected(Some(self.state.result_cursor));
        let highlight = if focused {
            theme::selected()
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        };
        StatefulWidget::render(
            List::new(items).highlight_style(highlight).highlight_symbol("> "),
            list_area,
            buf,
            &mut list_state,
        );
    }
}

/// Initial screen before any search
pub struct Welcome;

impl Widget for Welcome {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(vec![
            Line::raw(""),
            Line::styled("Welcome to your AI Kitchen!", theme::title()),
            Line::raw(""),
            Line::raw("Select the ingredients you have on the left,"),
            Line::raw("set your preferences, and press g."),
            Line::raw("The AI chef will suggest recipes you can cook right now."),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
    }
}

pub struct ErrorBanner<'a> {
    error: &'a AppError,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(error: &'a AppError) -> Self {
        Self { error }
    }

    /// Rows needed at the given width, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2);
        let body: u16 = self
            .error
            .user_message()
            .lines()
            .map(|line| wrapped_height(line, inner))
            .sum();
        body + 2
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .error
            .user_message()
            .lines()
            .map(|l| Line::raw(l.to_string()))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(theme::ERROR))
            .block(
                Block::default()
                    .title(format!(" {} (Esc to dismiss) ", self.error.title()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::ERROR)),
            )
            .render(area, buf);
    }
}

/// Rough wrapped line count for `text` at `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let chars = text.chars().count() as u16;
    chars.div_ceil(width).max(1)
}
