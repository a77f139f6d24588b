use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::filters::ImageQuality;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pantry-driven recipe assistant", long_about = None)]
pub struct Cli {
    /// Environment variable holding the Gemini API key (default: API_KEY, then GEMINI_API_KEY)
    #[arg(long, global = true)]
    pub api_key_env: Option<String>,

    /// Where favorite recipes are stored
    #[arg(long, global = true)]
    pub favorites_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Generate recipes once and print them
    Generate(GenerateArgs),

    /// Inspect or edit saved favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Chat with the AI chef about a favorite recipe
    Chat {
        /// Name of the favorite recipe
        recipe: String,
    },

    /// Print the ingredient and preference catalogs
    Catalog,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Ingredient you have (repeatable)
    #[arg(short, long = "ingredient", required = true)]
    pub ingredients: Vec<String>,

    #[arg(long, default_value = "Any")]
    pub cuisine: String,

    #[arg(long, default_value = "Any")]
    pub diet: String,

    #[arg(long, default_value = "Any")]
    pub time: String,

    #[arg(long, default_value = "English")]
    pub language: String,

    #[arg(long, default_value = "1K")]
    pub image_quality: ImageQuality,

    /// Wait for the generated images
    #[arg(long)]
    pub images: bool,

    /// Save generated images into this directory (implies --images)
    #[arg(long)]
    pub save_images: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List saved favorites
    List,
    /// Print one favorite in full
    Show { recipe: String },
    /// Remove a favorite by name
    Remove { recipe: String },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["smart_recipe"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_collects_repeated_ingredients() {
        let cli = Cli::try_parse_from([
            "smart_recipe",
            "generate",
            "-i",
            "Paneer",
            "--ingredient",
            "Tomato",
            "--cuisine",
            "Indian",
            "--image-quality",
            "2K",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.ingredients, ["Paneer", "Tomato"]);
                assert_eq!(args.cuisine, "Indian");
                assert_eq!(args.image_quality, ImageQuality::TwoK);
                assert_eq!(args.language, "English");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn generate_requires_an_ingredient() {
        assert!(Cli::try_parse_from(["smart_recipe", "generate"]).is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "smart_recipe",
            "favorites",
            "list",
            "--favorites-file",
            "/tmp/f.json",
        ])
        .unwrap();
        assert_eq!(cli.favorites_file, Some(PathBuf::from("/tmp/f.json")));
    }
}
