use anyhow::Result;
use smart_recipe::cli::{parse_args, Command};
use smart_recipe::config::AppConfig;
use smart_recipe::controller::AppController;
use smart_recipe::favorites::{Favorites, JsonFileStore};
use smart_recipe::recipe_generator::GeminiBackend;
use smart_recipe::{headless, logging, tui};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for API keys

    let cli_args = parse_args();

    let mut config = AppConfig::from_env();
    if let Some(var) = &cli_args.api_key_env {
        config = config.with_api_key_env(var.clone());
    }
    if let Some(path) = &cli_args.favorites_file {
        config = config.with_favorites_path(path.clone());
    }

    if let Err(e) = logging::init(&config.log_dir()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    tracing::info!(
        text_model = %config.text_model,
        image_model = %config.image_model,
        credential = %config.api_key.describe(),
        "configuration loaded"
    );

    let backend = Arc::new(GeminiBackend::new(&config));
    let favorites = Favorites::load(Box::new(JsonFileStore::new(config.favorites_path.clone())));
    let mut controller = AppController::new(backend, favorites);

    match cli_args.command.unwrap_or(Command::Tui) {
        Command::Tui => tui::run(controller).await,
        Command::Generate(args) => headless::run_generate(&mut controller, &args).await,
        Command::Favorites { action } => headless::run_favorites(&mut controller, &action),
        Command::Chat { recipe } => headless::run_chat(&controller, &recipe).await,
        Command::Catalog => {
            headless::print_catalog();
            Ok(())
        }
    }
}
