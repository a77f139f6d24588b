//! UI state layered over the controller: focus, cursors, overlays and the
//! per-recipe detail view.

use tracing::warn;

use crate::chef_chat::Conversation;
use crate::controller::AppController;
use crate::error::AppError;
use crate::filters::search_catalog;
use crate::recipe::Recipe;

pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Ingredients,
    Preferences,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Ingredients => Focus::Preferences,
            Focus::Preferences => Focus::Results,
            Focus::Results => Focus::Ingredients,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Ingredients => Focus::Results,
            Focus::Preferences => Focus::Ingredients,
            Focus::Results => Focus::Preferences,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceRow {
    Cuisine,
    Diet,
    Time,
    Language,
    ImageQuality,
}

impl PreferenceRow {
    pub const ALL: [PreferenceRow; 5] = [
        PreferenceRow::Cuisine,
        PreferenceRow::Diet,
        PreferenceRow::Time,
        PreferenceRow::Language,
        PreferenceRow::ImageQuality,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PreferenceRow::Cuisine => "Cuisine",
            PreferenceRow::Diet => "Diet",
            PreferenceRow::Time => "Time",
            PreferenceRow::Language => "Language",
            PreferenceRow::ImageQuality => "Image quality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    Browsing,
    Cooking { step: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    /// The last step was showing; the view should close.
    Finish,
}

/// Chat about one recipe. Lives as long as the detail view that opened it.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    pub session: u64,
    pub conversation: Conversation,
    pub input: String,
    pub pending: bool,
    /// Set when the chat could not be opened; input stays disabled.
    pub unavailable: Option<String>,
}

impl ChatPanel {
    pub fn new(session: u64, conversation: Conversation) -> Self {
        Self {
            session,
            conversation,
            input: String::new(),
            pending: false,
            unavailable: None,
        }
    }

    pub fn unavailable(session: u64, recipe: &Recipe, reason: String) -> Self {
        Self {
            unavailable: Some(reason),
            ..Self::new(session, Conversation::for_recipe(recipe))
        }
    }

    pub fn can_send(&self) -> bool {
        !self.pending && self.unavailable.is_none() && !self.input.trim().is_empty()
    }

    /// Moves the typed text into the transcript and returns the conversation
    /// to send. `None` while a reply is pending or the input is blank.
    pub fn submit(&mut self) -> Option<Conversation> {
        if !self.can_send() {
            return None;
        }
        let message = std::mem::take(&mut self.input);
        self.conversation.push_user(message.trim());
        self.pending = true;
        Some(self.conversation.clone())
    }

    pub fn receive(&mut self, reply: String) {
        self.conversation.push_model(reply);
        self.pending = false;
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    pub recipe: Recipe,
    pub mode: DetailMode,
    pub scroll: u16,
    pub chat: Option<ChatPanel>,
    pub show_chat: bool,
    pub share_open: bool,
}

impl DetailView {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            mode: DetailMode::Browsing,
            scroll: 0,
            chat: None,
            show_chat: false,
            share_open: false,
        }
    }

    pub fn step_count(&self) -> usize {
        self.recipe.cooking_steps.len()
    }

    pub fn current_step(&self) -> Option<usize> {
        match self.mode {
            DetailMode::Cooking { step } => Some(step),
            DetailMode::Browsing => None,
        }
    }

    pub fn start_cooking(&mut self) {
        self.mode = DetailMode::Cooking { step: 0 };
        self.chat = None;
        self.show_chat = false;
        self.share_open = false;
    }

    pub fn is_last_step(&self) -> bool {
        matches!(self.mode, DetailMode::Cooking { step } if step + 1 >= self.step_count())
    }

    pub fn previous_step(&mut self) {
        if let DetailMode::Cooking { step } = &mut self.mode {
            *step = step.saturating_sub(1);
        }
    }

    pub fn next_step(&mut self) -> StepOutcome {
        if self.is_last_step() {
            return StepOutcome::Finish;
        }
        if let DetailMode::Cooking { step } = &mut self.mode {
            *step += 1;
        }
        StepOutcome::Advanced
    }
}

pub struct UiState {
    pub controller: AppController,
    pub focus: Focus,
    pub ingredient_cursor: usize,
    pub search: String,
    pub search_active: bool,
    pub preference_cursor: usize,
    pub result_cursor: usize,
    pub detail: Option<DetailView>,
    /// Cursor into the favorites list while that overlay is open.
    pub favorites_overlay: Option<usize>,
    pub spinner_frame: usize,
    pub status: Option<String>,
    should_quit: bool,
    next_session: u64,
}

impl UiState {
    pub fn new(controller: AppController) -> Self {
        Self {
            controller,
            focus: Focus::default(),
            ingredient_cursor: 0,
            search: String::new(),
            search_active: false,
            preference_cursor: 0,
            result_cursor: 0,
            detail: None,
            favorites_overlay: None,
            spinner_frame: 0,
            status: None,
            should_quit: false,
            next_session: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Catalog items that pass the current search filter, in display order.
    pub fn visible_ingredients(&self) -> Vec<&'static str> {
        search_catalog(&self.search)
            .into_iter()
            .flat_map(|m| m.items)
            .collect()
    }

    pub fn highlighted_ingredient(&self) -> Option<&'static str> {
        self.visible_ingredients().get(self.ingredient_cursor).copied()
    }

    pub fn move_ingredient_cursor(&mut self, delta: isize) {
        let len = self.visible_ingredients().len();
        self.ingredient_cursor = step_cursor(self.ingredient_cursor, delta, len);
    }

    pub fn toggle_highlighted_ingredient(&mut self) {
        if let Some(item) = self.highlighted_ingredient() {
            self.controller.filters.toggle_ingredient(item);
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.ingredient_cursor = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.ingredient_cursor = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.search_active = false;
        self.ingredient_cursor = 0;
    }

    /// Adds the search term as a custom ingredient and clears the search box.
    pub fn add_search_as_custom(&mut self) {
        let before = self.controller.filters.ingredients().len();
        if let Some(added) = self.controller.filters.add_custom_ingredient(&self.search) {
            self.status = Some(if self.controller.filters.ingredients().len() > before {
                format!("Added {added}")
            } else {
                format!("{added} is already selected")
            });
        }
        self.clear_search();
    }

    pub fn preference_row(&self) -> PreferenceRow {
        PreferenceRow::ALL[self.preference_cursor % PreferenceRow::ALL.len()]
    }

    pub fn move_preference_cursor(&mut self, delta: isize) {
        self.preference_cursor =
            step_cursor(self.preference_cursor, delta, PreferenceRow::ALL.len());
    }

    pub fn cycle_preference(&mut self, forward: bool) {
        let row = self.preference_row();
        let filters = &mut self.controller.filters;
        let choice = match row {
            PreferenceRow::Cuisine => &mut filters.cuisine,
            PreferenceRow::Diet => &mut filters.diet,
            PreferenceRow::Time => &mut filters.cooking_time,
            PreferenceRow::Language => &mut filters.language,
            PreferenceRow::ImageQuality => {
                filters.image_quality = if forward {
                    filters.image_quality.next()
                } else {
                    filters.image_quality.previous()
                };
                return;
            }
        };
        if forward {
            choice.next();
        } else {
            choice.previous();
        }
    }

    pub fn move_result_cursor(&mut self, delta: isize) {
        let len = self.controller.recipes().len();
        self.result_cursor = step_cursor(self.result_cursor, delta, len);
    }

    /// The generate button is disabled while loading or with nothing selected.
    pub fn can_generate(&self) -> bool {
        !self.controller.is_loading() && self.controller.filters.has_ingredients()
    }

    pub fn open_recipe(&mut self, recipe: Recipe) {
        self.detail = Some(DetailView::new(recipe));
    }

    pub fn open_selected_result(&mut self) {
        if let Some(recipe) = self.controller.recipe(self.result_cursor).cloned() {
            self.open_recipe(recipe);
        }
    }

    /// Closing the detail view also ends its chat.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Shows or hides the chat panel, opening the conversation the first time.
    pub fn toggle_chat(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        if detail.chat.is_none() {
            self.next_session += 1;
            let session = self.next_session;
            let panel = match self.controller.backend().open_conversation(&detail.recipe) {
                Ok(conversation) => ChatPanel::new(session, conversation),
                Err(err) => {
                    warn!(recipe = %detail.recipe.recipe_name, error = %err, "chat unavailable");
                    let reason = AppError::from_generation(err).user_message();
                    ChatPanel::unavailable(session, &detail.recipe, reason)
                }
            };
            detail.chat = Some(panel);
        }
        detail.show_chat = !detail.show_chat;
    }

    pub fn toggle_favorite_in_detail(&mut self) {
        let Some(recipe) = self.detail.as_ref().map(|d| d.recipe.clone()) else {
            return;
        };
        self.controller.toggle_favorite(&recipe);
    }

    pub fn open_favorites(&mut self) {
        self.favorites_overlay = Some(0);
    }

    pub fn close_favorites(&mut self) {
        self.favorites_overlay = None;
    }

    pub fn move_favorites_cursor(&mut self, delta: isize) {
        let len = self.controller.favorites().len();
        if let Some(cursor) = self.favorites_overlay.as_mut() {
            *cursor = step_cursor(*cursor, delta, len);
        }
    }

    /// Replaces the detail selection with the highlighted favorite.
    pub fn view_highlighted_favorite(&mut self) {
        let Some(cursor) = self.favorites_overlay else {
            return;
        };
        if let Some(recipe) = self.controller.favorites().list().get(cursor).cloned() {
            self.close_favorites();
            self.open_recipe(recipe);
        }
    }

    pub fn remove_highlighted_favorite(&mut self) {
        let Some(cursor) = self.favorites_overlay else {
            return;
        };
        if let Some(recipe) = self.controller.favorites().list().get(cursor).cloned() {
            self.controller.toggle_favorite(&recipe);
            let len = self.controller.favorites().len();
            self.favorites_overlay = Some(cursor.min(len.saturating_sub(1)));
        }
    }
}

fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = cursor as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}
