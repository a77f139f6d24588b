//! Scripted commands: the same controller and adapter as the terminal UI,
//! with plain stdout output.

use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::catalog::{
    COOKING_TIMES, CUISINES, DIETS, INGREDIENT_CATEGORIES, LANGUAGES, NO_RESULTS,
};
use crate::chef_chat::Conversation;
use crate::cli::{FavoritesAction, GenerateArgs};
use crate::controller::AppController;
use crate::error::AppError;
use crate::favorites::FavoriteToggle;
use crate::filters::{Choice, ImageQuality};
use crate::recipe::{decode_data_uri, image_extension, Recipe};

fn select_or_fail(choice: &mut Choice, value: &str, what: &str) -> Result<()> {
    if choice.select(value) {
        Ok(())
    } else {
        bail!(
            "Unknown {what} '{value}'. Choose one of: {}",
            choice.options().join(", ")
        )
    }
}

pub async fn run_generate(controller: &mut AppController, args: &GenerateArgs) -> Result<()> {
    for ingredient in &args.ingredients {
        controller.filters.add_custom_ingredient(ingredient);
    }
    select_or_fail(&mut controller.filters.cuisine, &args.cuisine, "cuisine")?;
    select_or_fail(&mut controller.filters.diet, &args.diet, "diet")?;
    select_or_fail(&mut controller.filters.cooking_time, &args.time, "cooking time")?;
    select_or_fail(&mut controller.filters.language, &args.language, "language")?;
    controller.filters.image_quality = args.image_quality;

    println!(
        "Asking the AI chef about: {}...",
        controller.filters.ingredients().join(", ")
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let count = match controller.generate(&tx).await {
        Ok(count) => count,
        Err(err) => return Err(report(&err)),
    };
    drop(tx);

    if count == 0 {
        println!("\n{NO_RESULTS}");
    }
    if let Some(recommendation) = controller.recommendations() {
        println!("\nSmart Suggestions:\n  {recommendation}");
    }

    let wait_for_images = args.images || args.save_images.is_some();
    if wait_for_images && count > 0 {
        println!("\nGenerating {count} images ({})...", args.image_quality);
        while let Some(ready) = rx.recv().await {
            let index = ready.index;
            if controller.apply_image(ready) {
                println!("  -> image ready for recipe {}", index + 1);
            } else {
                println!("  -> no image for recipe {}", index + 1);
            }
        }
    }

    for (index, recipe) in controller.recipes().iter().enumerate() {
        print_recipe(index + 1, recipe);
    }

    if let Some(dir) = &args.save_images {
        save_images(controller.recipes(), dir).await?;
    }
    Ok(())
}

fn report(err: &AppError) -> anyhow::Error {
    eprintln!("\n{}\n{}", err.title(), err.user_message());
    anyhow!("{}", err.title())
}

pub fn print_recipe(number: usize, recipe: &Recipe) {
    println!("\n=== {number}. {} ===", recipe.recipe_name);
    println!("{}", recipe.description);
    println!(
        "Time: {} | Difficulty: {} | {}",
        recipe.estimated_time, recipe.difficulty_level, recipe.serving_size
    );
    println!("\nIngredients:");
    for ingredient in &recipe.required_ingredients {
        println!("  - {ingredient}");
    }
    println!("\nSteps:");
    for (i, step) in recipe.cooking_steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    if !recipe.optional_variations.is_empty() {
        println!("\nVariations:");
        for variation in &recipe.optional_variations {
            println!("  * {variation}");
        }
    }
    if !recipe.shopping_list.is_empty() {
        println!("\nShopping list:");
        for item in &recipe.shopping_list {
            println!("  [ ] {item}");
        }
    }
    if let Some(nutrition) = recipe.nutritional_info.as_ref().filter(|n| !n.is_empty()) {
        let line = nutrition
            .entries()
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("\nNutrition (per serving): {line}");
    }
    if let Some(drink) = &recipe.drink_pairing {
        println!("\nDrink pairing: {drink}");
    }
    println!(
        "Image: {}",
        if recipe.has_image() {
            "generated".to_string()
        } else {
            recipe.display_image()
        }
    );
}

async fn save_images(recipes: &[Recipe], dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create image directory {}", dir.display()))?;
    for (index, recipe) in recipes.iter().enumerate() {
        let Some((mime, bytes)) = recipe.image_url.as_deref().and_then(decode_data_uri) else {
            continue;
        };
        let path = dir.join(format!(
            "{}-{}.{}",
            index + 1,
            slugify(&recipe.recipe_name),
            image_extension(&mime)
        ));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

pub fn slugify(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let parts: Vec<&str> = slug.split('-').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        "recipe".to_string()
    } else {
        parts.join("-")
    }
}

pub fn run_favorites(controller: &mut AppController, action: &FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List => {
            let favorites = controller.favorites().list();
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for recipe in favorites {
                println!(
                    "{} ({}, {})",
                    recipe.recipe_name, recipe.estimated_time, recipe.difficulty_level
                );
            }
        }
        FavoritesAction::Show { recipe } => {
            let found = controller
                .favorites()
                .get(recipe)
                .ok_or_else(|| anyhow!("No favorite named '{recipe}'"))?;
            print_recipe(1, found);
        }
        FavoritesAction::Remove { recipe } => {
            let found = controller
                .favorites()
                .get(recipe)
                .cloned()
                .ok_or_else(|| anyhow!("No favorite named '{recipe}'"))?;
            if controller.toggle_favorite(&found) == FavoriteToggle::Removed {
                println!("Removed '{recipe}' from favorites.");
            }
        }
    }
    Ok(())
}

pub async fn run_chat(controller: &AppController, recipe_name: &str) -> Result<()> {
    let recipe = controller
        .favorites()
        .get(recipe_name)
        .cloned()
        .ok_or_else(|| anyhow!("No favorite named '{recipe_name}'"))?;
    let backend = controller.backend();
    let mut conversation: Conversation = backend
        .open_conversation(&recipe)
        .map_err(|err| report(&AppError::from_generation(err)))?;

    println!("Chef: {}", conversation.greeting());
    println!("(type /quit to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" {
            break;
        }
        let reply = conversation.send(backend.as_ref(), message).await;
        println!("Chef: {reply}");
    }
    Ok(())
}

pub fn print_catalog() {
    println!("Ingredients:");
    for category in INGREDIENT_CATEGORIES {
        println!("  {}: {}", category.name, category.items.join(", "));
    }
    println!("Cuisines: {}", CUISINES.join(", "));
    println!("Diets: {}", DIETS.join(", "));
    println!("Cooking times: {}", COOKING_TIMES.join(", "));
    println!("Languages: {}", LANGUAGES.join(", "));
    println!(
        "Image quality: {}",
        ImageQuality::ALL
            .iter()
            .map(|q| q.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
