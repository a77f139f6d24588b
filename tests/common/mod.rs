//! Scripted stand-in for the Gemini backend.
#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use smart_recipe::api_connection::ApiConnectionError;
use smart_recipe::chef_chat::Conversation;
use smart_recipe::config::CredentialHint;
use smart_recipe::error::GenerationError;
use smart_recipe::filters::ImageQuality;
use smart_recipe::recipe::{GenerationResult, Recipe};
use smart_recipe::recipe_generator::{RecipeBackend, RecipeQuery};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeBackend {
    results: Mutex<VecDeque<Result<GenerationResult, GenerationError>>>,
    images: HashMap<String, String>,
    image_delays: HashMap<String, Duration>,
    chat_replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    missing_credential: bool,
    queries: Mutex<Vec<RecipeQuery>>,
    recipe_calls: AtomicUsize,
    image_calls: AtomicUsize,
    chat_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, result: GenerationResult) -> Self {
        self.push_result(Ok(result));
        self
    }

    pub fn with_error(self, err: GenerationError) -> Self {
        self.push_result(Err(err));
        self
    }

    pub fn with_image(mut self, recipe_name: &str, data_uri: &str) -> Self {
        self.images.insert(recipe_name.to_string(), data_uri.to_string());
        self
    }

    pub fn with_image_delay(mut self, recipe_name: &str, millis: u64) -> Self {
        self.image_delays
            .insert(recipe_name.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn with_chat_reply(self, reply: Result<String, GenerationError>) -> Self {
        self.chat_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn without_credential(mut self) -> Self {
        self.missing_credential = true;
        self
    }

    fn push_result(&self, result: Result<GenerationResult, GenerationError>) {
        self.results.lock().unwrap().push_back(result);
    }

    pub fn recipe_calls(&self) -> usize {
        self.recipe_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<RecipeQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RecipeBackend for FakeBackend {
    async fn generate_recipes(
        &self,
        query: &RecipeQuery,
    ) -> Result<GenerationResult, GenerationError> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        if self.missing_credential {
            return Err(GenerationError::Configuration("API_KEY".to_string()));
        }
        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(GenerationResult::default()))
    }

    async fn generate_recipe_image(
        &self,
        recipe_name: &str,
        _description: &str,
        _quality: ImageQuality,
    ) -> Option<String> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.image_delays.get(recipe_name) {
            tokio::time::sleep(*delay).await;
        }
        self.images.get(recipe_name).cloned()
    }

    fn open_conversation(&self, recipe: &Recipe) -> Result<Conversation, GenerationError> {
        if self.missing_credential {
            return Err(GenerationError::Configuration("API_KEY".to_string()));
        }
        Ok(Conversation::for_recipe(recipe))
    }

    async fn chat_reply(&self, _conversation: &Conversation) -> Result<String, GenerationError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.chat_replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok("Happy cooking!".to_string()))
    }
}

pub fn recipe(name: &str) -> Recipe {
    Recipe {
        recipe_name: name.to_string(),
        description: format!("A quick {name}."),
        required_ingredients: vec!["Paneer".to_string(), "Tomato".to_string()],
        cooking_steps: vec!["Prep".to_string(), "Cook".to_string(), "Serve".to_string()],
        estimated_time: "30 mins".to_string(),
        difficulty_level: "Easy".to_string(),
        serving_size: "2 servings".to_string(),
        ..Default::default()
    }
}

pub fn result_of(names: &[&str]) -> GenerationResult {
    GenerationResult {
        recipes: names.iter().map(|n| recipe(n)).collect(),
        recommendations: None,
    }
}

pub fn api_error(status: StatusCode, body: &str, credential: CredentialHint) -> GenerationError {
    GenerationError::Upstream(ApiConnectionError::Api {
        status,
        error_body: body.to_string(),
        credential,
    })
}
