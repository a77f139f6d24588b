//! Reusable UI components

pub mod chat;
pub mod cooking_mode;
pub mod favorites;
pub mod filter_panel;
pub mod header;
pub mod modal;
pub mod recipe_detail;
pub mod results;
pub mod share;

pub use chat::ChatPanelWidget;
pub use cooking_mode::CookingMode;
pub use favorites::FavoritesOverlay;
pub use filter_panel::FilterPanel;
pub use header::Header;
pub use recipe_detail::RecipeDetail;
pub use results::{ErrorBanner, ResultsArea, Welcome};
pub use share::ShareOverlay;
