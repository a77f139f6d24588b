use std::fmt;
use std::str::FromStr;

use crate::catalog::{
    IngredientCategory, COOKING_TIMES, CUISINES, DIETS, INGREDIENT_CATEGORIES, LANGUAGES,
};
use crate::recipe_generator::RecipeQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageQuality {
    #[default]
    OneK,
    TwoK,
    FourK,
}

impl ImageQuality {
    pub const ALL: [ImageQuality; 3] =
        [ImageQuality::OneK, ImageQuality::TwoK, ImageQuality::FourK];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageQuality::OneK => "1K",
            ImageQuality::TwoK => "2K",
            ImageQuality::FourK => "4K",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ImageQuality::OneK => ImageQuality::TwoK,
            ImageQuality::TwoK => ImageQuality::FourK,
            ImageQuality::FourK => ImageQuality::OneK,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ImageQuality::OneK => ImageQuality::FourK,
            ImageQuality::TwoK => ImageQuality::OneK,
            ImageQuality::FourK => ImageQuality::TwoK,
        }
    }
}

impl fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageQuality::ALL
            .into_iter()
            .find(|q| q.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown image quality '{s}' (expected 1K, 2K or 4K)"))
    }
}

/// A single selection out of a fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    options: &'static [&'static str],
    index: usize,
}

impl Choice {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self { options, index: 0 }
    }

    pub fn value(&self) -> &'static str {
        self.options.get(self.index).copied().unwrap_or("Any")
    }

    pub fn options(&self) -> &'static [&'static str] {
        self.options
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + 1) % self.options.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + self.options.len() - 1) % self.options.len();
        }
    }

    /// Case-insensitive selection by name. Unknown names leave the choice untouched.
    pub fn select(&mut self, value: &str) -> bool {
        match self
            .options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(value.trim()))
        {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    ingredients: Vec<String>,
    pub cuisine: Choice,
    pub diet: Choice,
    pub cooking_time: Choice,
    pub language: Choice,
    pub image_quality: ImageQuality,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            ingredients: Vec::new(),
            cuisine: Choice::new(CUISINES),
            diet: Choice::new(DIETS),
            cooking_time: Choice::new(COOKING_TIMES),
            language: Choice::new(LANGUAGES),
            image_quality: ImageQuality::default(),
        }
    }
}

impl FilterSelection {
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.is_empty()
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|i| i == ingredient)
    }

    /// Returns whether the ingredient is selected afterwards.
    pub fn toggle_ingredient(&mut self, ingredient: &str) -> bool {
        if let Some(pos) = self.ingredients.iter().position(|i| i == ingredient) {
            self.ingredients.remove(pos);
            false
        } else {
            self.ingredients.push(ingredient.to_string());
            true
        }
    }

    /// Adds a free-text ingredient, capitalizing its first letter. Returns the
    /// stored form, or `None` for blank input.
    pub fn add_custom_ingredient(&mut self, term: &str) -> Option<String> {
        let term = term.trim();
        let mut chars = term.chars();
        let first = chars.next()?;
        let formatted: String = first.to_uppercase().chain(chars).collect();
        if !self.contains(&formatted) {
            self.ingredients.push(formatted.clone());
        }
        Some(formatted)
    }

    pub fn clear_ingredients(&mut self) {
        self.ingredients.clear();
    }

    pub fn to_query(&self) -> RecipeQuery {
        RecipeQuery {
            ingredients: self.ingredients.clone(),
            cuisine: self.cuisine.value().to_string(),
            diet: self.diet.value().to_string(),
            time: self.cooking_time.value().to_string(),
            language: self.language.value().to_string(),
        }
    }
}

/// A category with the items that survived a search filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatch {
    pub category: &'static str,
    pub items: Vec<&'static str>,
}

pub fn search_catalog(term: &str) -> Vec<CatalogMatch> {
    search_categories(INGREDIENT_CATEGORIES, term)
}

fn search_categories(categories: &[IngredientCategory], term: &str) -> Vec<CatalogMatch> {
    let needle = term.trim().to_lowercase();
    categories
        .iter()
        .map(|category| CatalogMatch {
            category: category.name,
            items: category
                .items
                .iter()
                .copied()
                .filter(|item| item.to_lowercase().contains(&needle))
                .collect(),
        })
        .filter(|m| !m.items.is_empty())
        .collect()
}
