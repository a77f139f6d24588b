//! Main render/view function (View in TEA pattern)

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::state::{DetailMode, Focus, UiState};
use super::theme;
use super::widgets;

/// Screen regions for the main view
pub struct ScreenAreas {
    pub header: Rect,
    pub filters: Rect,
    pub results: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> ScreenAreas {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    let [filters, results] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);
    ScreenAreas {
        header,
        filters,
        results,
        status,
    }
}

/// Render the complete UI. Pure: reads the state, never changes it.
pub fn view(frame: &mut Frame, state: &UiState) {
    let area = frame.area();
    let areas = layout(area);

    frame.render_widget(
        widgets::Header::new(state.controller.favorites().len()),
        areas.header,
    );
    frame.render_widget(widgets::FilterPanel::new(state), areas.filters);
    frame.render_widget(widgets::ResultsArea::new(state), areas.results);
    frame.render_widget(Paragraph::new(status_line(state)), areas.status);

    if let Some(detail) = &state.detail {
        match detail.mode {
            DetailMode::Browsing => {
                let is_favorite = state.controller.is_favorite(&detail.recipe.recipe_name);
                frame.render_widget(widgets::RecipeDetail::new(detail, is_favorite), area);
                if detail.share_open {
                    let text = detail.recipe.share_text();
                    frame.render_widget(widgets::ShareOverlay::new(&text), area);
                }
            }
            DetailMode::Cooking { step } => {
                frame.render_widget(widgets::CookingMode::new(&detail.recipe, step), area);
            }
        }
    }

    if let Some(cursor) = state.favorites_overlay {
        frame.render_widget(
            widgets::FavoritesOverlay::new(state.controller.favorites().list(), cursor),
            area,
        );
    }
}

fn status_line(state: &UiState) -> Line<'_> {
    if let Some(status) = &state.status {
        return Line::styled(format!(" {status}"), theme::key_hint());
    }
    let hints: &[(&str, &str)] = if state.search_active {
        &[("Enter", "add custom"), ("Tab", "toggle match"), ("Esc", "cancel")]
    } else {
        match state.focus {
            Focus::Ingredients => &[
                ("Tab", "next panel"),
                ("space", "toggle"),
                ("/", "search"),
                ("g", "generate"),
            ],
            Focus::Preferences => &[("Tab", "next panel"), ("<- ->", "change"), ("g", "generate")],
            Focus::Results => &[("Tab", "next panel"), ("Enter", "open recipe"), ("g", "generate")],
        }
    };
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(format!("[{key}] "), theme::key_hint()));
        spans.push(Span::styled(format!("{label}  "), theme::dim()));
    }
    Line::from(spans)
}
