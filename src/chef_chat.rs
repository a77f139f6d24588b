//! Per-recipe chat with the assistant chef.
//!
//! The transcript is a plain value owned by whoever shows the chat. The
//! backend only ever sees it read-only and answers the last user turn.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::recipe::Recipe;
use crate::recipe_generator::RecipeBackend;

pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't understand that.";
pub const CONNECTION_FALLBACK: &str = "Sorry, I'm having trouble connecting to the kitchen right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Model,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    recipe_name: String,
    system_context: String,
    turns: Vec<ChatTurn>,
}

impl Conversation {
    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self {
            recipe_name: recipe.recipe_name.clone(),
            system_context: chef_context(recipe),
            turns: Vec::new(),
        }
    }

    pub fn recipe_name(&self) -> &str {
        &self.recipe_name
    }

    pub fn system_context(&self) -> &str {
        &self.system_context
    }

    /// Turns exchanged with the backend, oldest first. The greeting is not included.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn greeting(&self) -> String {
        format!(
            "Hi! I'm your AI Chef. Ask me anything about cooking {}!",
            self.recipe_name
        )
    }

    /// Greeting followed by the transcript, for display.
    pub fn display_turns(&self) -> Vec<ChatTurn> {
        std::iter::once(ChatTurn::model(self.greeting()))
            .chain(self.turns.iter().cloned())
            .collect()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::user(text));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::model(text));
    }

    pub fn awaiting_reply(&self) -> bool {
        matches!(self.turns.last(), Some(turn) if turn.speaker == Speaker::User)
    }

    /// One full exchange: records the user turn, asks the backend, records and
    /// returns the answer. Never fails; problems turn into a fallback answer.
    pub async fn send(&mut self, backend: &dyn RecipeBackend, message: &str) -> String {
        self.push_user(message.trim());
        let reply = reply_or_fallback(backend, self).await;
        self.push_model(reply.clone());
        reply
    }
}

/// Answer the trailing user turn of `conversation`.
pub async fn reply_or_fallback(backend: &dyn RecipeBackend, conversation: &Conversation) -> String {
    match backend.chat_reply(conversation).await {
        Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY_FALLBACK.to_string(),
        Ok(reply) => reply,
        Err(err) => {
            warn!(recipe = %conversation.recipe_name, error = %err, "chat turn failed");
            CONNECTION_FALLBACK.to_string()
        }
    }
}

fn chef_context(recipe: &Recipe) -> String {
    format!(
        "You are a professional, friendly chef assistant. The user is currently viewing the recipe: \"{}\".

Recipe Details:
- Description: {}
- Ingredients: {}
- Steps: {}

Your goal is to answer the user's questions about this specific recipe.
You can suggest substitutions, explain cooking techniques mentioned in the steps, or give advice on storage and leftovers.
Keep your answers concise, helpful, and encouraging. Do not invent ingredients not mentioned unless asked for substitutions.",
        recipe.recipe_name,
        recipe.description,
        recipe.required_ingredients.join(", "),
        recipe.cooking_steps.join("; "),
    )
}
