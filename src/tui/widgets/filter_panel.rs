//! Left-hand panel: ingredient picker, preferences and the generate button

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::filters::search_catalog;
use crate::tui::state::{Focus, PreferenceRow, UiState};
use crate::tui::theme;

pub struct FilterPanel<'a> {
    state: &'a UiState,
}

impl<'a> FilterPanel<'a> {
    pub fn new(state: &'a UiState) -> Self {
        Self { state }
    }

    fn render_ingredients(&self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let filters = &state.controller.filters;
        let focused = state.focus == Focus::Ingredients;

        let block = Block::default()
            .title(format!(" Ingredients ({} selected) ", filters.ingredients().len()))
            .borders(Borders::ALL)
            .border_style(theme::border(focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        let search_line = if state.search_active {
            Line::from(vec![
                Span::styled("Search: ", theme::key_hint()),
                Span::raw(state.search.as_str()),
                Span::styled("_", theme::key_hint()),
                Span::styled("  (Enter adds it as custom)", theme::dim()),
            ])
        } else if !state.search.is_empty() {
            Line::from(vec![
                Span::styled("Search: ", theme::dim()),
                Span::raw(state.search.as_str()),
            ])
        } else {
            Line::styled("/ search or add custom   space toggle   x clear", theme::dim())
        };
        Paragraph::new(search_line).render(search_area, buf);

        let mut lines = Vec::new();
        let mut cursor_line = 0usize;
        let mut item_index = 0usize;
        let matches = search_catalog(&state.search);
        if matches.is_empty() {
            lines.push(Line::styled(
                format!("No match. Press Enter to add \"{}\".", state.search.trim()),
                theme::dim(),
            ));
        }
        for category in matches {
            lines.push(Line::styled(
                category.category,
                Style::default().add_modifier(Modifier::BOLD),
            ));
            for item in category.items {
                let checked = if filters.contains(item) { "[x]" } else { "[ ]" };
                let text = format!("  {checked} {item}");
                if item_index == state.ingredient_cursor {
                    cursor_line = lines.len();
                    let style = if focused {
                        theme::selected()
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    lines.push(Line::styled(text, style));
                } else if filters.contains(item) {
                    lines.push(Line::styled(text, Style::default().fg(theme::SUCCESS)));
                } else {
                    lines.push(Line::raw(text));
                }
                item_index += 1;
            }
        }

        let height = list_area.height as usize;
        let scroll = if height == 0 {
            0
        } else {
            cursor_line.saturating_sub(height.saturating_sub(1))
        };
        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(list_area, buf);
    }

    fn render_selected(&self, area: Rect, buf: &mut Buffer) {
        let ingredients = self.state.controller.filters.ingredients();
        let line = if ingredients.is_empty() {
            Line::styled("Nothing selected yet", theme::dim())
        } else {
            Line::from(vec![
                Span::styled("Selected: ", theme::dim()),
                Span::styled(ingredients.join(", "), Style::default().fg(theme::SUCCESS)),
            ])
        };
        Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_preferences(&self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let filters = &state.controller.filters;
        let focused = state.focus == Focus::Preferences;

        let block = Block::default()
            .title(" Preferences ")
            .borders(Borders::ALL)
            .border_style(theme::border(focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = PreferenceRow::ALL
            .iter()
            .map(|row| {
                let value = match row {
                    PreferenceRow::Cuisine => filters.cuisine.value(),
                    PreferenceRow::Diet => filters.diet.value(),
                    PreferenceRow::Time => filters.cooking_time.value(),
                    PreferenceRow::Language => filters.language.value(),
                    PreferenceRow::ImageQuality => filters.image_quality.as_str(),
                };
                let highlighted = focused && *row == state.preference_row();
                let value_style = if highlighted {
                    theme::selected()
                } else {
                    Style::default().fg(theme::ACCENT)
                };
                Line::from(vec![
                    Span::raw(format!("{:<14}", row.label())),
                    Span::styled(format!("< {value} >"), value_style),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_generate(&self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let (label, style) = if state.controller.is_loading() {
            (
                format!("{} Cooking up ideas...", state.spinner()),
                theme::dim(),
            )
        } else if state.can_generate() {
            ("[g] Generate Recipes".to_string(), theme::selected())
        } else {
            ("[g] Generate Recipes (select ingredients)".to_string(), theme::dim())
        };
        Paragraph::new(Line::styled(label, style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme::dim()))
            .render(area, buf);
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [ingredients, selected, preferences, generate] = Layout::vertical([
            Constraint::Min(6),
            Constraint::Length(2),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .areas(area);

        self.render_ingredients(ingredients, buf);
        self.render_selected(selected, buf);
        self.render_preferences(preferences, buf);
        self.render_generate(generate, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_utils::{test_state, TestTerminal};

    #[test]
    fn shows_catalog_and_default_preferences() {
        let state = test_state();
        let mut term = TestTerminal::with_size(60, 40);
        term.render_widget(FilterPanel::new(&state), term.area());
        assert!(term.buffer_contains("Ingredients (0 selected)"));
        assert!(term.buffer_contains("Vegetables"));
        assert!(term.buffer_contains("< Any >"));
        assert!(term.buffer_contains("< English >"));
        assert!(term.buffer_contains("(select ingredients)"));
    }

    #[test]
    fn selected_ingredients_are_listed() {
        let mut state = test_state();
        state.controller.filters.toggle_ingredient("Tomato");
        state.controller.filters.add_custom_ingredient("saffron");
        let mut term = TestTerminal::with_size(60, 40);
        term.render_widget(FilterPanel::new(&state), term.area());
        assert!(term.buffer_contains("Selected: Tomato, Saffron"));
        assert!(term.buffer_contains("[g] Generate Recipes"));
        assert!(!term.buffer_contains("(select ingredients)"));
    }

    #[test]
    fn unmatched_search_offers_custom_entry() {
        let mut state = test_state();
        state.search = "dragonfruit".to_string();
        state.search_active = true;
        let mut term = TestTerminal::with_size(60, 40);
        term.render_widget(FilterPanel::new(&state), term.area());
        assert!(term.buffer_contains("No match. Press Enter to add \"dragonfruit\"."));
    }
}
