//! Terminal event polling

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

use super::message::Message;

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    // 50ms timeout keeps the spinner moving at 20 FPS
    if event::poll(Duration::from_millis(50))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(Message::Key(key))),
            Event::Key(key) => {
                tracing::trace!(?key, "ignoring non-press key event");
                Ok(None)
            }
            _ => Ok(None),
        }
    } else {
        Ok(Some(Message::Tick))
    }
}
