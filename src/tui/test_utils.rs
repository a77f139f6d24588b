//! Helpers for rendering tests against ratatui's TestBackend

use async_trait::async_trait;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};
use std::sync::Arc;

use super::state::UiState;
use crate::chef_chat::Conversation;
use crate::controller::AppController;
use crate::error::GenerationError;
use crate::favorites::{Favorites, MemoryStore};
use crate::filters::ImageQuality;
use crate::recipe::{GenerationResult, Recipe};
use crate::recipe_generator::{RecipeBackend, RecipeQuery};

pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("render widget");
    }

    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, y)].symbol());
        }
        result.push('\n');
    }
    result
}

/// Backend that answers nothing; rendering and key tests never await it.
struct IdleBackend;

#[async_trait]
impl RecipeBackend for IdleBackend {
    async fn generate_recipes(
        &self,
        _query: &RecipeQuery,
    ) -> Result<GenerationResult, GenerationError> {
        Ok(GenerationResult::default())
    }

    async fn generate_recipe_image(
        &self,
        _name: &str,
        _description: &str,
        _quality: ImageQuality,
    ) -> Option<String> {
        None
    }

    fn open_conversation(&self, recipe: &Recipe) -> Result<Conversation, GenerationError> {
        Ok(Conversation::for_recipe(recipe))
    }

    async fn chat_reply(&self, _conversation: &Conversation) -> Result<String, GenerationError> {
        Ok(String::new())
    }
}

pub fn test_state() -> UiState {
    let favorites = Favorites::load(Box::new(MemoryStore::new()));
    UiState::new(AppController::new(Arc::new(IdleBackend), favorites))
}

pub fn sample_recipe(name: &str, steps: usize) -> Recipe {
    Recipe {
        recipe_name: name.to_string(),
        description: format!("{name} made simple."),
        required_ingredients: vec!["Paneer".to_string(), "Tomato".to_string()],
        cooking_steps: (1..=steps).map(|i| format!("Step {i}")).collect(),
        estimated_time: "30 mins".to_string(),
        difficulty_level: "Easy".to_string(),
        serving_size: "2 servings".to_string(),
        ..Default::default()
    }
}
