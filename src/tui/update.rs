//! Update function: applies a message to the state and names the background
//! work the loop should start.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::message::Message;
use super::state::{DetailMode, Focus, StepOutcome, UiState};
use crate::chef_chat::Conversation;
use crate::controller::{ImageJob, SearchTicket};

/// Work the event loop should spawn after an update
#[derive(Debug, Clone)]
pub enum Action {
    /// Run the text phase of a search
    Search(SearchTicket),
    /// Request one image per recipe
    FetchImages(Vec<ImageJob>),
    /// Answer the last user turn of a chat
    AskChef {
        session: u64,
        conversation: Conversation,
    },
}

pub fn update(state: &mut UiState, message: Message) -> Option<Action> {
    match message {
        Message::Key(key) => handle_key(state, key),
        Message::Tick => {
            state.tick();
            None
        }
        Message::RecipesGenerated { generation, result } => {
            let jobs = state.controller.finish_search(generation, result);
            if generation == state.controller.current_generation() {
                state.result_cursor = 0;
                if !state.controller.recipes().is_empty() {
                    state.focus = Focus::Results;
                }
            }
            (!jobs.is_empty()).then_some(Action::FetchImages(jobs))
        }
        Message::ImageReady(ready) => {
            state.controller.apply_image(ready);
            None
        }
        Message::ChatReply { session, reply } => {
            match state.detail.as_mut().and_then(|d| d.chat.as_mut()) {
                Some(panel) if panel.session == session => panel.receive(reply),
                _ => debug!(session, "dropping reply for a closed chat"),
            }
            None
        }
    }
}

pub fn handle_key(state: &mut UiState, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.request_quit();
        return None;
    }
    state.status = None;

    if state.favorites_overlay.is_some() {
        handle_key_favorites(state, key);
        return None;
    }
    if state.detail.is_some() {
        return handle_key_detail(state, key);
    }
    if state.search_active {
        handle_key_search(state, key);
        return None;
    }
    handle_key_main(state, key)
}

fn handle_key_main(state: &mut UiState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => state.request_quit(),
        KeyCode::Tab => state.focus = state.focus.next(),
        KeyCode::BackTab => state.focus = state.focus.previous(),
        KeyCode::Char('g') | KeyCode::F(5) => return start_search(state),
        KeyCode::Char('f') | KeyCode::F(2) => state.open_favorites(),
        KeyCode::Esc => state.controller.dismiss_error(),
        _ => match state.focus {
            Focus::Ingredients => handle_key_ingredients(state, key),
            Focus::Preferences => handle_key_preferences(state, key),
            Focus::Results => handle_key_results(state, key),
        },
    }
    None
}

fn start_search(state: &mut UiState) -> Option<Action> {
    if state.controller.is_loading() {
        return None;
    }
    // A rejected selection leaves its message on the controller for the banner.
    state.controller.begin_search().ok().map(Action::Search)
}

fn handle_key_ingredients(state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_ingredient_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_ingredient_cursor(1),
        KeyCode::Char(' ') | KeyCode::Enter => state.toggle_highlighted_ingredient(),
        KeyCode::Char('/') => state.search_active = true,
        KeyCode::Char('x') => state.controller.filters.clear_ingredients(),
        _ => {}
    }
}

fn handle_key_search(state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.clear_search(),
        KeyCode::Enter => state.add_search_as_custom(),
        KeyCode::Backspace => state.pop_search_char(),
        KeyCode::Up => state.move_ingredient_cursor(-1),
        KeyCode::Down => state.move_ingredient_cursor(1),
        KeyCode::Tab => {
            state.toggle_highlighted_ingredient();
        }
        KeyCode::Char(c) => state.push_search_char(c),
        _ => {}
    }
}

fn handle_key_preferences(state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_preference_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_preference_cursor(1),
        KeyCode::Left | KeyCode::Char('h') => state.cycle_preference(false),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter | KeyCode::Char(' ') => {
            state.cycle_preference(true)
        }
        _ => {}
    }
}

fn handle_key_results(state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_result_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_result_cursor(1),
        KeyCode::Enter => state.open_selected_result(),
        _ => {}
    }
}

fn handle_key_favorites(state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('f') | KeyCode::F(2) => {
            state.close_favorites()
        }
        KeyCode::Up | KeyCode::Char('k') => state.move_favorites_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_favorites_cursor(1),
        KeyCode::Enter => state.view_highlighted_favorite(),
        KeyCode::Char('d') | KeyCode::Delete => state.remove_highlighted_favorite(),
        _ => {}
    }
}

fn handle_key_detail(state: &mut UiState, key: KeyEvent) -> Option<Action> {
    let detail = state.detail.as_mut()?;

    if detail.share_open {
        detail.share_open = false;
        return None;
    }

    if let DetailMode::Cooking { .. } = detail.mode {
        match key.code {
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => detail.previous_step(),
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Enter => {
                if detail.next_step() == StepOutcome::Finish {
                    state.close_detail();
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => state.close_detail(),
            _ => {}
        }
        return None;
    }

    if detail.show_chat {
        let panel = detail.chat.as_mut()?;
        match key.code {
            KeyCode::Esc => detail.show_chat = false,
            KeyCode::Enter => {
                let session = panel.session;
                return panel
                    .submit()
                    .map(|conversation| Action::AskChef { session, conversation });
            }
            KeyCode::Backspace => {
                panel.input.pop();
            }
            KeyCode::Char(c) if !panel.pending && panel.unavailable.is_none() => {
                panel.input.push(c);
            }
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => state.close_detail(),
        KeyCode::Up | KeyCode::Char('k') => detail.scroll = detail.scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => detail.scroll = detail.scroll.saturating_add(1),
        KeyCode::Char('c') => detail.start_cooking(),
        KeyCode::Char('s') => detail.share_open = true,
        KeyCode::Char('a') | KeyCode::Char('t') => state.toggle_chat(),
        KeyCode::Char('f') => state.toggle_favorite_in_detail(),
        KeyCode::F(2) => state.open_favorites(),
        _ => {}
    }
    None
}
