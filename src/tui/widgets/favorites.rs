//! Saved recipes overlay

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::modal::{centered_rect, modal_block};
use crate::recipe::Recipe;
use crate::tui::theme;

pub struct FavoritesOverlay<'a> {
    favorites: &'a [Recipe],
    cursor: usize,
}

impl<'a> FavoritesOverlay<'a> {
    pub fn new(favorites: &'a [Recipe], cursor: usize) -> Self {
        Self { favorites, cursor }
    }
}

impl Widget for FavoritesOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(70, 70, area);
        Clear.render(modal, buf);

        let block = modal_block("My Favorite Recipes");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [list_area, hints] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        if self.favorites.is_empty() {
            Paragraph::new(vec![
                Line::raw(""),
                Line::raw("You haven't saved any favorites yet."),
                Line::styled("Open a recipe and press f to keep it here.", theme::dim()),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(list_area, buf);
        } else {
            let items: Vec<ListItem> = self
                .favorites
                .iter()
                .map(|recipe| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            recipe.recipe_name.as_str(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {} | {}", recipe.estimated_time, recipe.difficulty_level),
                            theme::dim(),
                        ),
                    ]))
                })
                .collect();
            let mut state = ListState::default().with_selected(Some(self.cursor));
            StatefulWidget::render(
                List::new(items)
                    .highlight_style(theme::selected())
                    .highlight_symbol("> "),
                list_area,
                buf,
                &mut state,
            );
        }

        Paragraph::new(Line::from(vec![
            Span::styled("[Enter] ", theme::key_hint()),
            Span::styled("View  ", theme::dim()),
            Span::styled("[d] ", theme::key_hint()),
            Span::styled("Remove  ", theme::dim()),
            Span::styled("[Esc] ", theme::key_hint()),
            Span::styled("Close", theme::dim()),
        ]))
        .render(hints, buf);
    }
}
