use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::api_connection::endpoints::{
    Content, GenerateContentRequest, GenerationConfig, ImageConfig, Part,
};
use crate::api_connection::{ApiConnectionError, Provider};
use crate::catalog::SYSTEM_PROMPT;
use crate::chef_chat::{Conversation, Speaker};
use crate::config::AppConfig;
use crate::error::GenerationError;
use crate::filters::ImageQuality;
use crate::recipe::{parse_generation_result, recipe_response_schema, GenerationResult, Recipe};

pub const IMAGE_ASPECT_RATIO: &str = "16:9";

/// Everything the text model needs to know about one search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeQuery {
    pub ingredients: Vec<String>,
    pub cuisine: String,
    pub diet: String,
    pub time: String,
    pub language: String,
}

/// The three capabilities the app needs from a generative backend.
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    /// Fails with `Configuration` when no credential is set and `Upstream`
    /// for anything that goes wrong on the way, including an unusable payload.
    async fn generate_recipes(
        &self,
        query: &RecipeQuery,
    ) -> Result<GenerationResult, GenerationError>;

    /// Best effort. `None` on any failure.
    async fn generate_recipe_image(
        &self,
        recipe_name: &str,
        description: &str,
        quality: ImageQuality,
    ) -> Option<String>;

    fn open_conversation(&self, recipe: &Recipe) -> Result<Conversation, GenerationError>;

    /// Answers the last user turn of the conversation.
    async fn chat_reply(&self, conversation: &Conversation) -> Result<String, GenerationError>;
}

pub fn build_user_prompt(query: &RecipeQuery) -> String {
    format!(
        "User selected ingredients: {}
Cuisine preference: {}
Diet preference: {}
Time preference: {}
Language preference: {}

Generate 3–5 complete recipes based on these preferences.",
        query.ingredients.join(", "),
        query.cuisine,
        query.diet,
        query.time,
        query.language,
    )
}

pub fn build_image_prompt(recipe_name: &str, description: &str) -> String {
    format!(
        "A photorealistic, professional food photography shot of {recipe_name}. {description}. High resolution, appetizing, studio lighting, beautiful plating."
    )
}

/// Only the pro image models accept an explicit output size.
pub fn image_model_supports_size(model: &str) -> bool {
    model.contains("pro")
}

pub fn build_recipe_request(query: &RecipeQuery, temperature: f32) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(build_user_prompt(query))],
        system_instruction: Some(Content::system(SYSTEM_PROMPT)),
        generation_config: Some(GenerationConfig {
            temperature: Some(temperature),
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(recipe_response_schema()),
            ..Default::default()
        }),
    }
}

pub fn build_image_request(
    recipe_name: &str,
    description: &str,
    quality: ImageQuality,
    image_model: &str,
) -> GenerateContentRequest {
    let image_size = image_model_supports_size(image_model).then(|| quality.as_str().to_string());
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(build_image_prompt(recipe_name, description))],
        }],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["IMAGE".to_string()]),
            image_config: Some(ImageConfig {
                aspect_ratio: Some(IMAGE_ASPECT_RATIO.to_string()),
                image_size,
            }),
            ..Default::default()
        }),
    }
}

pub fn build_chat_request(conversation: &Conversation) -> GenerateContentRequest {
    let contents = conversation
        .turns()
        .iter()
        .map(|turn| match turn.speaker {
            Speaker::User => Content::user(turn.text.clone()),
            Speaker::Model => Content::model(turn.text.clone()),
        })
        .collect();
    GenerateContentRequest {
        contents,
        system_instruction: Some(Content::system(conversation.system_context())),
        generation_config: None,
    }
}

/// Production backend speaking to the Gemini REST API.
#[derive(Clone, Debug)]
pub struct GeminiBackend {
    provider: Provider,
    text_model: String,
    image_model: String,
    chat_model: String,
    text_temperature: f32,
}

impl GeminiBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            provider: Provider::with_base_url(config.api_key.clone(), &config.api_base_url),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            chat_model: config.chat_model.clone(),
            text_temperature: config.text_temperature,
        }
    }

    fn require_credential(&self) -> Result<(), GenerationError> {
        self.provider
            .resolve_api_key()
            .map(|_| ())
            .map_err(|_| GenerationError::Configuration(self.provider.api_key_source().describe()))
    }
}

#[async_trait]
impl RecipeBackend for GeminiBackend {
    #[instrument(skip(self, query), fields(ingredients = query.ingredients.len()))]
    async fn generate_recipes(
        &self,
        query: &RecipeQuery,
    ) -> Result<GenerationResult, GenerationError> {
        self.require_credential()?;
        let request = build_recipe_request(query, self.text_temperature);
        let response = self
            .provider
            .call_generate_content(&self.text_model, &request)
            .await?;

        let text = response
            .text()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ApiConnectionError::EmptyResponse("Empty response from AI".to_string())
            })?;

        let result = parse_generation_result(&text).map_err(|e| {
            debug!(error = %e, content = %text, "recipe payload did not match the schema");
            ApiConnectionError::Serialization(e)
        })?;
        info!(
            recipes = result.recipes.len(),
            has_recommendation = result.recommendations.is_some(),
            "recipes generated"
        );
        Ok(result)
    }

    async fn generate_recipe_image(
        &self,
        recipe_name: &str,
        description: &str,
        quality: ImageQuality,
    ) -> Option<String> {
        if self.provider.resolve_api_key().is_err() {
            warn!("API key is missing; image generation skipped");
            return None;
        }
        let request = build_image_request(recipe_name, description, quality, &self.image_model);
        match self
            .provider
            .call_generate_content(&self.image_model, &request)
            .await
        {
            Ok(response) => {
                let image = response.inline_image_data_uri();
                if image.is_none() {
                    warn!(recipe = recipe_name, "image response carried no inline data");
                }
                image
            }
            Err(err) => {
                warn!(recipe = recipe_name, error = %err, "image generation failed");
                None
            }
        }
    }

    fn open_conversation(&self, recipe: &Recipe) -> Result<Conversation, GenerationError> {
        self.require_credential()?;
        Ok(Conversation::for_recipe(recipe))
    }

    async fn chat_reply(&self, conversation: &Conversation) -> Result<String, GenerationError> {
        self.require_credential()?;
        let request = build_chat_request(conversation);
        let response = self
            .provider
            .call_generate_content(&self.chat_model, &request)
            .await?;
        Ok(response.text().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKeySource;

    fn query() -> RecipeQuery {
        RecipeQuery {
            ingredients: vec!["Paneer".to_string(), "Tomato".to_string()],
            cuisine: "Indian".to_string(),
            diet: "Veg".to_string(),
            time: "Any".to_string(),
            language: "English".to_string(),
        }
    }

    fn keyless_backend() -> GeminiBackend {
        let mut config = AppConfig::default();
        config.api_key = ApiKeySource::env("SMART_RECIPE_UNSET_KEY_FOR_GENERATOR_TEST");
        config.api_base_url = "http://127.0.0.1:9".to_string();
        GeminiBackend::new(&config)
    }

    #[test]
    fn user_prompt_lists_preferences() {
        let prompt = build_user_prompt(&query());
        assert!(prompt.contains("User selected ingredients: Paneer, Tomato"));
        assert!(prompt.contains("Cuisine preference: Indian"));
        assert!(prompt.contains("Diet preference: Veg"));
        assert!(prompt.contains("Language preference: English"));
    }

    #[test]
    fn recipe_request_asks_for_json_with_schema() {
        let value = serde_json::to_value(build_recipe_request(&query(), 0.7)).unwrap();
        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert!(value["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Yo! You are Smart Recipe AI"));
    }

    #[test]
    fn image_size_only_sent_to_models_that_accept_it() {
        let flash = serde_json::to_value(build_image_request(
            "Dal",
            "Comforting",
            ImageQuality::FourK,
            "gemini-2.5-flash-image",
        ))
        .unwrap();
        assert!(flash["generationConfig"]["imageConfig"].get("imageSize").is_none());
        assert_eq!(flash["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");

        let pro = serde_json::to_value(build_image_request(
            "Dal",
            "Comforting",
            ImageQuality::FourK,
            "gemini-3-pro-image-preview",
        ))
        .unwrap();
        assert_eq!(pro["generationConfig"]["imageConfig"]["imageSize"], "4K");
    }

    #[test]
    fn chat_request_maps_speakers_to_roles() {
        let recipe = Recipe {
            recipe_name: "Dal".to_string(),
            ..Default::default()
        };
        let mut conversation = Conversation::for_recipe(&recipe);
        conversation.push_user("Hi");
        conversation.push_model("Hello!");
        conversation.push_user("Less salt?");
        let value = serde_json::to_value(build_chat_request(&conversation)).unwrap();
        let roles: Vec<&str> = value["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, ["user", "model", "user"]);
    }

    #[tokio::test]
    async fn missing_key_is_a_configuration_error() {
        let backend = keyless_backend();
        let result = backend.generate_recipes(&query()).await;
        assert!(matches!(result, Err(GenerationError::Configuration(_))));
    }

    #[tokio::test]
    async fn missing_key_yields_no_image() {
        let backend = keyless_backend();
        let image = backend
            .generate_recipe_image("Dal", "Comforting", ImageQuality::OneK)
            .await;
        assert!(image.is_none());
    }

    #[test]
    fn missing_key_blocks_chat() {
        let backend = keyless_backend();
        let recipe = Recipe {
            recipe_name: "Dal".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            backend.open_conversation(&recipe),
            Err(GenerationError::Configuration(_))
        ));
    }
}
