//! Everything the UI loop reacts to.

use crossterm::event::KeyEvent;

use crate::controller::ImageReady;
use crate::error::AppError;
use crate::recipe::GenerationResult;

#[derive(Debug, Clone)]
pub enum Message {
    /// Key press from the terminal
    Key(KeyEvent),

    /// Poll timeout, drives the spinner
    Tick,

    /// Text phase of a search finished
    RecipesGenerated {
        generation: u64,
        result: Result<GenerationResult, AppError>,
    },

    /// One image job finished, with or without an image
    ImageReady(ImageReady),

    /// The chef answered a chat turn
    ChatReply { session: u64, reply: String },
}
