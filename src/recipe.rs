use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::api_connection::endpoints::Schema;

pub const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct NutritionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<String>,
}

impl NutritionalInfo {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fats.is_none()
    }

    /// Label/value pairs for the fields that are present, in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Calories", self.calories.as_deref()),
            ("Protein", self.protein.as_deref()),
            ("Carbs", self.carbs.as_deref()),
            ("Fats", self.fats.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}

/// Models emit `null` for fields they have nothing to say about.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A generated recipe. `recipe_name` is its identity: favorites and
/// de-duplication compare by name only.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipe_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cooking_steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serving_size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optional_variations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shopping_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drink_pairing: Option<String>,
}

impl Recipe {
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }

    /// The generated image, or a stable placeholder seeded by the name.
    pub fn display_image(&self) -> String {
        match &self.image_url {
            Some(url) => url.clone(),
            None => format!("{PLACEHOLDER_IMAGE_BASE}/{}/800/400", self.recipe_name),
        }
    }

    pub fn share_text(&self) -> String {
        let key_ingredients = self
            .required_ingredients
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Check out this recipe for {}!\n\n{}\n\nKey Ingredients: {}... and more!",
            self.recipe_name, self.description, key_ingredients
        )
    }
}

/// What one text-generation call produced.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub recommendations: Option<String>,
}

impl GenerationResult {
    /// Empty recommendation text means "no recommendation".
    pub fn normalized(mut self) -> Self {
        self.recommendations = self
            .recommendations
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }
}

/// Models sometimes wrap JSON in markdown fences even when asked not to.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut content = raw.trim();
    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.trim_end().strip_suffix("```") {
        content = rest;
    }
    content.trim()
}

pub fn parse_generation_result(raw: &str) -> Result<GenerationResult, serde_json::Error> {
    serde_json::from_str::<GenerationResult>(strip_code_fences(raw))
        .map(GenerationResult::normalized)
}

/// Splits a `data:<mime>;base64,<payload>` URI into its MIME type and bytes.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

/// File extension for an image MIME type.
pub fn image_extension(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

pub fn recipe_json_schema() -> Schema {
    let mut nutrition = BTreeMap::new();
    nutrition.insert("calories".to_string(), Schema::string("e.g., '240 kcal'"));
    nutrition.insert("protein".to_string(), Schema::string("e.g., '10g'"));
    nutrition.insert("carbs".to_string(), Schema::string("e.g., '30g'"));
    nutrition.insert("fats".to_string(), Schema::string("e.g., '15g'"));

    let mut properties = BTreeMap::new();
    properties.insert("recipeName".to_string(), Schema::string("Name of the recipe."));
    properties.insert(
        "description".to_string(),
        Schema::string("A short, appealing description of the dish."),
    );
    properties.insert(
        "requiredIngredients".to_string(),
        Schema::string_array("List of all ingredients needed for the recipe."),
    );
    properties.insert(
        "cookingSteps".to_string(),
        Schema::string_array("Step-by-step instructions for cooking."),
    );
    properties.insert("estimatedTime".to_string(), Schema::string("e.g., '25 mins'"));
    properties.insert(
        "difficultyLevel".to_string(),
        Schema::string("e.g., 'Easy', 'Medium', 'Hard'"),
    );
    properties.insert("servingSize".to_string(), Schema::string("e.g., 'Serves 2'"));
    properties.insert(
        "optionalVariations".to_string(),
        Schema::string_array("Suggestions for variations or substitutions."),
    );
    properties.insert(
        "nutritionalInfo".to_string(),
        Schema::object(nutrition, &[])
            .nullable()
            .with_description("Optional nutritional information per serving."),
    );
    properties.insert(
        "shoppingList".to_string(),
        Schema::string_array(
            "List of ingredients required for the recipe that were NOT in the user's provided list.",
        ),
    );
    properties.insert(
        "drinkPairing".to_string(),
        Schema::string("A beverage that goes well with this dish."),
    );

    Schema::object(
        properties,
        &[
            "recipeName",
            "description",
            "requiredIngredients",
            "cookingSteps",
            "estimatedTime",
            "difficultyLevel",
            "servingSize",
            "shoppingList",
            "drinkPairing",
        ],
    )
}

pub fn recipe_response_schema() -> Schema {
    let mut properties = BTreeMap::new();
    properties.insert(
        "recipes".to_string(),
        Schema::array_of(recipe_json_schema(), "An array of 3 to 5 recipe objects."),
    );
    properties.insert(
        "recommendations".to_string(),
        Schema::string(
            "Suggestions for extra items to buy or simpler dishes if ingredients are missing.",
        )
        .nullable(),
    );
    Schema::object(properties, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Recipe {
        Recipe {
            recipe_name: "Paneer Tikka".to_string(),
            description: "Smoky grilled paneer.".to_string(),
            required_ingredients: vec![
                "Paneer".to_string(),
                "Tomato".to_string(),
                "Yogurt".to_string(),
                "Garam Masala".to_string(),
                "Lemon".to_string(),
                "Onion".to_string(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn recipe_uses_camel_case_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["recipeName"], "Paneer Tikka");
        assert!(value.get("requiredIngredients").is_some());
        assert!(value.get("imageUrl").is_none());
        assert!(value.get("drinkPairing").is_none());
    }

    #[test]
    fn recipe_tolerates_missing_optional_fields() {
        let recipe: Recipe = serde_json::from_value(json!({"recipeName": "Toast"})).unwrap();
        assert_eq!(recipe.recipe_name, "Toast");
        assert!(recipe.cooking_steps.is_empty());
        assert!(recipe.nutritional_info.is_none());
    }

    #[test]
    fn share_text_lists_first_five_ingredients() {
        let text = sample().share_text();
        assert!(text.starts_with("Check out this recipe for Paneer Tikka!"));
        assert!(text
            .contains("Key Ingredients: Paneer, Tomato, Yogurt, Garam Masala, Lemon... and more!"));
        assert!(!text.contains("Onion"));
    }

    #[test]
    fn display_image_falls_back_to_placeholder() {
        let mut recipe = sample();
        assert_eq!(
            recipe.display_image(),
            "https://picsum.photos/seed/Paneer Tikka/800/400"
        );
        recipe.image_url = Some("data:image/png;base64,AA==".to_string());
        assert_eq!(recipe.display_image(), "data:image/png;base64,AA==");
    }

    #[test]
    fn strips_markdown_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fences("  {\"b\":2} "), "{\"b\":2}");
    }

    #[test]
    fn parse_treats_missing_recipes_as_empty() {
        let result = parse_generation_result("{\"recommendations\": \"Buy rice\"}").unwrap();
        assert!(result.recipes.is_empty());
        assert_eq!(result.recommendations.as_deref(), Some("Buy rice"));
    }

    #[test]
    fn parse_treats_null_recipes_as_empty() {
        let result =
            parse_generation_result(r#"{"recipes": null, "recommendations": "Buy rice"}"#).unwrap();
        assert!(result.recipes.is_empty());
        assert_eq!(result.recommendations.as_deref(), Some("Buy rice"));
    }

    #[test]
    fn null_recipe_fields_fall_back_to_empty() {
        let raw = r#"{"recipes": [{"recipeName": "Toast", "optionalVariations": null,
            "description": null, "cookingSteps": ["Toast the bread"], "shoppingList": null}]}"#;
        let result = parse_generation_result(raw).unwrap();
        let toast = &result.recipes[0];
        assert_eq!(toast.recipe_name, "Toast");
        assert!(toast.optional_variations.is_empty());
        assert!(toast.shopping_list.is_empty());
        assert!(toast.description.is_empty());
        assert_eq!(toast.cooking_steps, ["Toast the bread"]);
    }

    #[test]
    fn parse_drops_blank_recommendation() {
        let raw = r#"{"recipes": [{"recipeName": "A"}], "recommendations": "  "}"#;
        let result = parse_generation_result(raw).unwrap();
        assert_eq!(result.recipes.len(), 1);
        assert!(result.recommendations.is_none());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_generation_result("I cannot help with that").is_err());
    }

    #[test]
    fn decodes_base64_data_uri() {
        let (mime, bytes) = decode_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
        assert_eq!(image_extension(&mime), "png");
        assert!(decode_data_uri("https://example.com/x.png").is_none());
        assert!(decode_data_uri("data:image/png,plain").is_none());
    }

    #[test]
    fn response_schema_requires_core_fields() {
        let value = serde_json::to_value(recipe_response_schema()).unwrap();
        let required = value["properties"]["recipes"]["items"]["required"]
            .as_array()
            .unwrap();
        assert!(required.contains(&json!("shoppingList")));
        assert!(required.contains(&json!("drinkPairing")));
        assert!(!required.contains(&json!("nutritionalInfo")));
        assert_eq!(value["properties"]["recommendations"]["nullable"], true);
    }
}
