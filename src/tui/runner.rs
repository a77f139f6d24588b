//! Entry point and event loop

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

use super::message::Message;
use super::state::UiState;
use super::update::{update, Action};
use super::{event, render};
use crate::chef_chat::reply_or_fallback;
use crate::controller::{search_result, spawn_image_jobs, AppController, ImageReady};
use crate::recipe_generator::RecipeBackend;

/// Run the interactive UI until the user quits
pub async fn run(controller: AppController) -> Result<()> {
    // ratatui::init installs a panic hook that restores the terminal
    let mut terminal = ratatui::init();
    let mut state = UiState::new(controller);

    let (msg_tx, msg_rx) = mpsc::unbounded_channel::<Message>();
    let (image_tx, image_rx) = mpsc::unbounded_channel::<ImageReady>();

    info!("terminal UI started");
    let result = run_loop(&mut terminal, &mut state, msg_rx, image_rx, &msg_tx, &image_tx);
    ratatui::restore();
    info!("terminal UI stopped");
    result
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut UiState,
    mut msg_rx: UnboundedReceiver<Message>,
    mut image_rx: UnboundedReceiver<ImageReady>,
    msg_tx: &UnboundedSender<Message>,
    image_tx: &UnboundedSender<ImageReady>,
) -> Result<()> {
    while !state.should_quit() {
        // Background completions (non-blocking)
        while let Ok(msg) = msg_rx.try_recv() {
            process(state, msg, msg_tx, image_tx);
        }
        while let Ok(ready) = image_rx.try_recv() {
            process(state, Message::ImageReady(ready), msg_tx, image_tx);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process(state, message, msg_tx, image_tx);
        }
    }
    Ok(())
}

fn process(
    state: &mut UiState,
    message: Message,
    msg_tx: &UnboundedSender<Message>,
    image_tx: &UnboundedSender<ImageReady>,
) {
    if let Some(action) = update(state, message) {
        dispatch(action, state.controller.backend(), msg_tx, image_tx);
    }
}

fn dispatch(
    action: Action,
    backend: Arc<dyn RecipeBackend>,
    msg_tx: &UnboundedSender<Message>,
    image_tx: &UnboundedSender<ImageReady>,
) {
    match action {
        Action::Search(ticket) => {
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                let result = search_result(backend.generate_recipes(&ticket.query).await);
                let _ = tx.send(Message::RecipesGenerated {
                    generation: ticket.generation,
                    result,
                });
            });
        }
        Action::FetchImages(jobs) => spawn_image_jobs(backend, jobs, image_tx.clone()),
        Action::AskChef {
            session,
            conversation,
        } => {
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                let reply = reply_or_fallback(backend.as_ref(), &conversation).await;
                let _ = tx.send(Message::ChatReply { session, reply });
            });
        }
    }
}
