//! Favorite recipes and where they are kept between runs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::recipe::Recipe;

/// The single storage key the favorites live under.
pub const FAVORITES_STORAGE_KEY: &str = "favoriteRecipes";

/// Persistence port. Loading never fails: missing or unreadable data is an empty list.
pub trait FavoritesStore: Send {
    fn load(&self) -> Vec<Recipe>;
    fn save(&self, favorites: &[Recipe]) -> Result<()>;
}

fn parse_favorites(raw: &str, origin: &str) -> Vec<Recipe> {
    match serde_json::from_str::<Vec<Recipe>>(raw) {
        Ok(favorites) => favorites,
        Err(err) => {
            warn!(origin, error = %err, "stored favorites are corrupt; starting empty");
            Vec::new()
        }
    }
}

/// One JSON file holding the serialized favorites array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{FAVORITES_STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Vec<Recipe> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_favorites(&raw, &self.path.display().to_string()),
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no stored favorites");
                Vec::new()
            }
        }
    }

    fn save(&self, favorites: &[Recipe]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create favorites directory {}", dir.display())
            })?;
        }
        let bytes = serde_json::to_vec(favorites).context("Failed to serialize favorites")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory slot holding the serialized JSON, shared between clones so a
/// second store built from the same slot sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Vec<Recipe> {
        match self.raw() {
            Some(raw) => parse_favorites(&raw, "memory"),
            None => Vec::new(),
        }
    }

    fn save(&self, favorites: &[Recipe]) -> Result<()> {
        let raw = serde_json::to_string(favorites)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("favorites slot lock poisoned"))?;
        *slot = Some(raw);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

pub struct Favorites {
    store: Box<dyn FavoritesStore>,
    recipes: Vec<Recipe>,
}

impl Favorites {
    pub fn load(store: Box<dyn FavoritesStore>) -> Self {
        let recipes = store.load();
        debug!(count = recipes.len(), "favorites loaded");
        Self { store, recipes }
    }

    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn contains(&self, recipe_name: &str) -> bool {
        self.recipes.iter().any(|r| r.recipe_name == recipe_name)
    }

    pub fn get(&self, recipe_name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.recipe_name == recipe_name)
    }

    /// Adds the recipe if no favorite shares its name, removes it otherwise,
    /// then writes the whole list back to the store.
    pub fn toggle(&mut self, recipe: &Recipe) -> FavoriteToggle {
        let outcome = if self.contains(&recipe.recipe_name) {
            self.recipes.retain(|r| r.recipe_name != recipe.recipe_name);
            FavoriteToggle::Removed
        } else {
            self.recipes.push(recipe.clone());
            FavoriteToggle::Added
        };
        if let Err(err) = self.store.save(&self.recipes) {
            warn!(error = %err, "failed to persist favorites");
        }
        outcome
    }
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites")
            .field("recipes", &self.recipes.len())
            .finish()
    }
}
