//! Application state and the two-phase search flow.
//!
//! A search first awaits the text model, then fans out one image request per
//! recipe. Images come back in any order (or never) and are applied only if
//! they belong to the search that is still on screen.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::error::{AppError, GenerationError};
use crate::favorites::{FavoriteToggle, Favorites};
use crate::filters::{FilterSelection, ImageQuality};
use crate::recipe::{GenerationResult, Recipe};
use crate::recipe_generator::{RecipeBackend, RecipeQuery};

/// Issued by `begin_search`; hand the generation back to `finish_search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: RecipeQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub generation: u64,
    pub index: usize,
    pub recipe_name: String,
    pub description: String,
    pub quality: ImageQuality,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReady {
    pub generation: u64,
    pub index: usize,
    pub image: Option<String>,
}

pub struct AppController {
    backend: Arc<dyn RecipeBackend>,
    favorites: Favorites,
    pub filters: FilterSelection,
    recipes: Vec<Recipe>,
    recommendations: Option<String>,
    loading: bool,
    error: Option<AppError>,
    has_searched: bool,
    generation: u64,
    pending_image_quality: ImageQuality,
}

impl AppController {
    pub fn new(backend: Arc<dyn RecipeBackend>, favorites: Favorites) -> Self {
        Self {
            backend,
            favorites,
            filters: FilterSelection::default(),
            recipes: Vec::new(),
            recommendations: None,
            loading: false,
            error: None,
            has_searched: false,
            generation: 0,
            pending_image_quality: ImageQuality::default(),
        }
    }

    pub fn backend(&self) -> Arc<dyn RecipeBackend> {
        Arc::clone(&self.backend)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn recommendations(&self) -> Option<&str> {
        self.recommendations.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, recipe_name: &str) -> bool {
        self.favorites.contains(recipe_name)
    }

    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> FavoriteToggle {
        let outcome = self.favorites.toggle(recipe);
        info!(recipe = %recipe.recipe_name, ?outcome, "favorite toggled");
        outcome
    }

    /// Validates the selection and resets the result area for a new search.
    /// An empty ingredient selection is rejected before anything is sent.
    pub fn begin_search(&mut self) -> Result<SearchTicket, AppError> {
        if !self.filters.has_ingredients() {
            let err = AppError::empty_selection();
            self.error = Some(err.clone());
            return Err(err);
        }
        self.generation += 1;
        self.loading = true;
        self.has_searched = true;
        self.error = None;
        self.recipes.clear();
        self.recommendations = None;
        self.pending_image_quality = self.filters.image_quality;

        let ticket = SearchTicket {
            generation: self.generation,
            query: self.filters.to_query(),
        };
        debug!(
            generation = ticket.generation,
            ingredients = ticket.query.ingredients.len(),
            "search started"
        );
        Ok(ticket)
    }

    /// Stores the outcome of the text phase and returns the image jobs to run.
    /// Results for a search that has since been superseded are ignored.
    pub fn finish_search(
        &mut self,
        generation: u64,
        result: Result<GenerationResult, AppError>,
    ) -> Vec<ImageJob> {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale search result");
            return Vec::new();
        }
        self.loading = false;
        match result {
            Ok(result) => {
                self.recipes = result.recipes;
                self.recommendations = result.recommendations;
                self.error = None;
                self.recipes
                    .iter()
                    .enumerate()
                    .map(|(index, recipe)| ImageJob {
                        generation,
                        index,
                        recipe_name: recipe.recipe_name.clone(),
                        description: recipe.description.clone(),
                        quality: self.pending_image_quality,
                    })
                    .collect()
            }
            Err(err) => {
                warn!(error = %err, "search failed");
                self.recipes.clear();
                self.recommendations = None;
                self.error = Some(err);
                Vec::new()
            }
        }
    }

    /// Attaches an image to the slot it was requested for. Returns whether
    /// anything changed.
    pub fn apply_image(&mut self, ready: ImageReady) -> bool {
        if ready.generation != self.generation {
            debug!(
                generation = ready.generation,
                index = ready.index,
                "dropping image from an earlier search"
            );
            return false;
        }
        let Some(image) = ready.image else {
            return false;
        };
        match self.recipes.get_mut(ready.index) {
            Some(recipe) => {
                recipe.image_url = Some(image);
                true
            }
            None => false,
        }
    }

    /// The whole flow in one call: validate, await the text phase, start the
    /// image jobs, return the number of recipes. Images arrive on `images`.
    pub async fn generate(
        &mut self,
        images: &UnboundedSender<ImageReady>,
    ) -> Result<usize, AppError> {
        let ticket = self.begin_search()?;
        let result = self
            .backend
            .generate_recipes(&ticket.query)
            .await
            .map_err(AppError::from_generation);
        let jobs = self.finish_search(ticket.generation, result);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        spawn_image_jobs(self.backend(), jobs, images.clone());
        Ok(self.recipes.len())
    }
}

/// Runs every job concurrently. Each finished job reports into `sink`,
/// whether or not an image was produced.
pub fn spawn_image_jobs(
    backend: Arc<dyn RecipeBackend>,
    jobs: Vec<ImageJob>,
    sink: UnboundedSender<ImageReady>,
) {
    for job in jobs {
        let backend = Arc::clone(&backend);
        let sink = sink.clone();
        tokio::spawn(async move {
            let image = backend
                .generate_recipe_image(&job.recipe_name, &job.description, job.quality)
                .await;
            let _ = sink.send(ImageReady {
                generation: job.generation,
                index: job.index,
                image,
            });
        });
    }
}

/// Turns an adapter failure into the controller's error type.
pub fn search_result(
    result: Result<GenerationResult, GenerationError>,
) -> Result<GenerationResult, AppError> {
    result.map_err(AppError::from_generation)
}

impl std::fmt::Debug for AppController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppController")
            .field("recipes", &self.recipes.len())
            .field("loading", &self.loading)
            .field("generation", &self.generation)
            .field("error", &self.error)
            .finish()
    }
}
