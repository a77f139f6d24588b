//! Full recipe view with the optional chef chat on the right

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::chat::ChatPanelWidget;
use super::modal::{centered_rect, modal_block};
use crate::recipe::Recipe;
use crate::tui::state::DetailView;
use crate::tui::theme;

pub struct RecipeDetail<'a> {
    view: &'a DetailView,
    is_favorite: bool,
}

impl<'a> RecipeDetail<'a> {
    pub fn new(view: &'a DetailView, is_favorite: bool) -> Self {
        Self { view, is_favorite }
    }
}

fn section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
    )
}

/// The recipe body as display lines.
pub fn recipe_lines(recipe: &Recipe) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(recipe.description.clone()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Time: ", theme::dim()),
            Span::raw(recipe.estimated_time.clone()),
            Span::styled("   Difficulty: ", theme::dim()),
            Span::raw(recipe.difficulty_level.clone()),
            Span::styled("   Serves: ", theme::dim()),
            Span::raw(recipe.serving_size.clone()),
        ]),
        Line::styled(
            if recipe.has_image() {
                "Image: generated".to_string()
            } else {
                format!("Image: {}", recipe.display_image())
            },
            theme::dim(),
        ),
        Line::raw(""),
        section("Ingredients"),
    ];
    lines.extend(
        recipe
            .required_ingredients
            .iter()
            .map(|i| Line::raw(format!("  - {i}"))),
    );

    lines.push(Line::raw(""));
    lines.push(section("Instructions"));
    lines.extend(
        recipe
            .cooking_steps
            .iter()
            .enumerate()
            .map(|(n, step)| Line::raw(format!("  {}. {step}", n + 1))),
    );

    if !recipe.optional_variations.is_empty() {
        lines.push(Line::raw(""));
        lines.push(section("Variations"));
        lines.extend(
            recipe
                .optional_variations
                .iter()
                .map(|v| Line::raw(format!("  * {v}"))),
        );
    }

    if !recipe.shopping_list.is_empty() {
        lines.push(Line::raw(""));
        lines.push(section("Shopping List"));
        lines.extend(
            recipe
                .shopping_list
                .iter()
                .map(|item| Line::raw(format!("  [ ] {item}"))),
        );
    }

    if let Some(nutrition) = recipe.nutritional_info.as_ref().filter(|n| !n.is_empty()) {
        lines.push(Line::raw(""));
        lines.push(section("Nutrition (per serving)"));
        lines.push(Line::raw(format!(
            "  {}",
            nutrition
                .entries()
                .iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect::<Vec<_>>()
                .join("  |  ")
        )));
    }

    if let Some(drink) = &recipe.drink_pairing {
        lines.push(Line::raw(""));
        lines.push(section("Perfect Pairing"));
        lines.push(Line::raw(format!("  {drink}")));
    }
    lines
}

impl Widget for RecipeDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(92, 90, area);
        Clear.render(modal, buf);

        let recipe = &self.view.recipe;
        let title = if self.is_favorite {
            format!("{} ♥", recipe.recipe_name)
        } else {
            recipe.recipe_name.clone()
        };
        let block = modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let body = match (&self.view.chat, self.view.show_chat) {
            (Some(chat), true) => {
                let [content, chat_area] =
                    Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                        .areas(body);
                ChatPanelWidget::new(chat).render(chat_area, buf);
                content
            }
            _ => body,
        };

        Paragraph::new(recipe_lines(recipe))
            .wrap(Wrap { trim: false })
            .scroll((self.view.scroll, 0))
            .render(body, buf);

        let favorite_label = if self.is_favorite { "Favorited" } else { "Favorite" };
        let chat_label = if self.view.show_chat { "Hide Chef" } else { "Ask Chef" };
        let hints: Vec<Span> = [
            ("c", "Start Cooking"),
            ("f", favorite_label),
            ("a", chat_label),
            ("s", "Share"),
            ("Esc", "Close"),
        ]
        .into_iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!("[{key}] "), theme::key_hint()),
                Span::styled(format!("{label}  "), theme::dim()),
            ]
        })
        .collect();
        Paragraph::new(Line::from(hints)).render(footer, buf);
    }
}
