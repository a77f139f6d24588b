mod common;

use common::{api_error, recipe, result_of, FakeBackend};
use reqwest::StatusCode;
use smart_recipe::config::CredentialHint;
use smart_recipe::controller::{AppController, ImageReady};
use smart_recipe::error::AppError;
use smart_recipe::favorites::{FavoriteToggle, Favorites, MemoryStore};
use smart_recipe::filters::ImageQuality;
use smart_recipe::recipe::{parse_generation_result, GenerationResult, Recipe};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

fn controller_with(backend: Arc<FakeBackend>, store: MemoryStore) -> AppController {
    AppController::new(backend, Favorites::load(Box::new(store)))
}

fn controller(backend: Arc<FakeBackend>) -> AppController {
    controller_with(backend, MemoryStore::new())
}

fn names(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.recipe_name.as_str()).collect()
}

#[tokio::test]
async fn empty_selection_never_reaches_the_backend() {
    let backend = Arc::new(FakeBackend::new().with_result(result_of(&["Unused"])));
    let mut app = controller(backend.clone());
    let (tx, _rx) = mpsc::unbounded_channel();

    let err = app.generate(&tx).await.unwrap_err();

    assert_eq!(err, AppError::empty_selection());
    assert_eq!(app.error(), Some(&AppError::empty_selection()));
    assert_eq!(backend.recipe_calls(), 0);
    assert!(!app.is_loading());
    assert!(!app.has_searched());
}

#[tokio::test]
async fn stored_recipes_match_response_order() {
    let mut result = result_of(&["Shahi Paneer", "Tomato Rasam", "Paneer Bhurji"]);
    result.recommendations = Some("Grab some cream.".to_string());
    let backend = Arc::new(FakeBackend::new().with_result(result));
    let mut app = controller(backend.clone());
    app.filters.toggle_ingredient("Paneer");
    let (tx, _rx) = mpsc::unbounded_channel();

    let count = app.generate(&tx).await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(names(app.recipes()), ["Shahi Paneer", "Tomato Rasam", "Paneer Bhurji"]);
    assert_eq!(app.recommendations(), Some("Grab some cream."));
    assert!(!app.is_loading());
    assert!(app.error().is_none());
}

#[tokio::test]
async fn missing_recipes_field_is_an_empty_list() {
    let parsed = parse_generation_result("{}").unwrap();
    let backend = Arc::new(FakeBackend::new().with_result(parsed));
    let mut app = controller(backend.clone());
    app.filters.toggle_ingredient("Rice");
    let (tx, _rx) = mpsc::unbounded_channel();

    assert_eq!(app.generate(&tx).await.unwrap(), 0);
    assert!(app.recipes().is_empty());
    assert!(app.has_searched());
    assert!(app.error().is_none());
}

#[tokio::test]
async fn failure_clears_previous_results() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_result(result_of(&["A", "B"]))
            .with_error(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":{"code":500,"message":"model overloaded","status":"UNAVAILABLE"}}"#,
                CredentialHint::Google,
            )),
    );
    let mut app = controller(backend.clone());
    app.filters.toggle_ingredient("Egg");
    let (tx, _rx) = mpsc::unbounded_channel();

    app.generate(&tx).await.unwrap();
    assert_eq!(app.recipes().len(), 2);

    let err = app.generate(&tx).await.unwrap_err();
    assert_eq!(err, AppError::Upstream("model overloaded".to_string()));
    assert!(app.recipes().is_empty());
    assert!(app.recommendations().is_none());
    assert!(!app.is_loading());
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let backend = Arc::new(FakeBackend::new().without_credential());
    let mut app = controller(backend.clone());
    app.filters.toggle_ingredient("Egg");
    let (tx, _rx) = mpsc::unbounded_channel();

    let err = app.generate(&tx).await.unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));
    assert!(err.user_message().contains("aistudio.google.com"));
}

#[tokio::test]
async fn permission_guidance_depends_on_the_key() {
    let body = r#"{"error":{"code":403,"message":"Method doesn't allow unregistered callers","status":"PERMISSION_DENIED"}}"#;
    let backend = Arc::new(
        FakeBackend::new()
            .with_error(api_error(StatusCode::FORBIDDEN, body, CredentialHint::Google))
            .with_error(api_error(StatusCode::FORBIDDEN, body, CredentialHint::Foreign)),
    );
    let mut app = controller(backend);
    app.filters.toggle_ingredient("Egg");
    let (tx, _rx) = mpsc::unbounded_channel();

    let first = app.generate(&tx).await.unwrap_err();
    assert!(matches!(first, AppError::Permission { foreign_credential: false, .. }));
    assert!(first.user_message().contains("blocked or not enabled"));

    let second = app.generate(&tx).await.unwrap_err();
    assert!(matches!(second, AppError::Permission { foreign_credential: true, .. }));
    assert!(second.user_message().contains("other AI providers"));
}

#[tokio::test]
async fn images_applied_in_any_completion_order() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_result(result_of(&["Slow", "Fast", "Broken"]))
            .with_image("Slow", PNG)
            .with_image_delay("Slow", 40)
            .with_image("Fast", PNG),
    );
    let mut app = controller(backend.clone());
    app.filters.toggle_ingredient("Egg");
    let (tx, mut rx) = mpsc::unbounded_channel();

    app.generate(&tx).await.unwrap();
    drop(tx);
    // Text phase returns before any image lands.
    assert!(app.recipes().iter().all(|r| !r.has_image()));

    let mut order = Vec::new();
    while let Some(ready) = rx.recv().await {
        order.push(ready.index);
        app.apply_image(ready);
    }

    assert_eq!(order.len(), 3);
    assert_eq!(order.last(), Some(&0));
    assert_eq!(backend.image_calls(), 3);
    assert_eq!(app.recipes()[0].image_url.as_deref(), Some(PNG));
    assert_eq!(app.recipes()[1].image_url.as_deref(), Some(PNG));
    // A failed image leaves the slot as it was.
    assert!(app.recipes()[2].image_url.is_none());
}

#[tokio::test]
async fn images_from_an_earlier_search_are_dropped() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_result(result_of(&["Same Name", "Other"]))
            .with_result(result_of(&["Same Name", "Newer"])),
    );
    let mut app = controller(backend.clone());
    app.filters.toggle_ingredient("Egg");
    let (tx, _rx) = mpsc::unbounded_channel();

    app.generate(&tx).await.unwrap();
    let stale_generation = app.current_generation();
    app.generate(&tx).await.unwrap();

    // Same index and same recipe name, but addressed to the previous search.
    let applied = app.apply_image(ImageReady {
        generation: stale_generation,
        index: 0,
        image: Some(PNG.to_string()),
    });
    assert!(!applied);
    assert!(app.recipes()[0].image_url.is_none());

    let applied = app.apply_image(ImageReady {
        generation: app.current_generation(),
        index: 7,
        image: Some(PNG.to_string()),
    });
    assert!(!applied);
}

#[tokio::test]
async fn superseded_text_result_is_ignored() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = controller(backend);
    app.filters.toggle_ingredient("Egg");

    let first = app.begin_search().unwrap();
    let second = app.begin_search().unwrap();
    assert!(second.generation > first.generation);

    let jobs = app.finish_search(first.generation, Ok(result_of(&["Old"])));
    assert!(jobs.is_empty());
    assert!(app.is_loading());
    assert!(app.recipes().is_empty());

    let jobs = app.finish_search(second.generation, Ok(result_of(&["New"])));
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].recipe_name, "New");
    assert_eq!(names(app.recipes()), ["New"]);
}

#[tokio::test]
async fn image_jobs_use_the_quality_chosen_at_search_time() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = controller(backend);
    app.filters.toggle_ingredient("Egg");
    app.filters.image_quality = ImageQuality::FourK;

    let ticket = app.begin_search().unwrap();
    app.filters.image_quality = ImageQuality::OneK;
    let jobs = app.finish_search(ticket.generation, Ok(result_of(&["Omelette", "Shakshuka"])));

    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|job| job.quality == ImageQuality::FourK));
}

#[tokio::test]
async fn favorites_survive_a_restart() {
    let store = MemoryStore::new();
    let backend = Arc::new(FakeBackend::new());

    let mut first_run = controller_with(backend.clone(), store.clone());
    first_run.toggle_favorite(&recipe("Dal Tadka"));
    first_run.toggle_favorite(&recipe("Jeera Rice"));
    drop(first_run);

    let second_run = controller_with(backend, store);
    let restored: HashSet<&str> = names(second_run.favorites().list()).into_iter().collect();
    assert_eq!(restored, HashSet::from(["Dal Tadka", "Jeera Rice"]));
}

#[tokio::test]
async fn favorite_toggle_never_duplicates() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = controller(backend);
    let dal = recipe("Dal Tadka");

    assert_eq!(app.toggle_favorite(&dal), FavoriteToggle::Added);
    assert_eq!(app.toggle_favorite(&dal), FavoriteToggle::Removed);
    assert!(!app.is_favorite("Dal Tadka"));
    assert_eq!(app.toggle_favorite(&dal), FavoriteToggle::Added);
    assert_eq!(app.favorites().len(), 1);
}

#[tokio::test]
async fn corrupt_favorites_start_empty() {
    let backend = Arc::new(FakeBackend::new());
    let app = controller_with(backend, MemoryStore::with_raw("not json at all"));
    assert!(app.favorites().is_empty());
}

#[tokio::test]
async fn paneer_and_tomato_indian_veg() {
    let mut result = GenerationResult::default();
    for (name, shopping) in [
        ("Paneer Butter Masala", vec!["Butter", "Cream"]),
        ("Paneer Tikka", vec!["Yogurt", "Bell Pepper"]),
        ("Tomato Paneer Bhurji", vec!["Green Chili"]),
    ] {
        let mut r = recipe(name);
        r.shopping_list = shopping.into_iter().map(str::to_string).collect();
        result.recipes.push(r);
    }
    let backend = Arc::new(FakeBackend::new().with_result(result));
    let mut app = controller(backend.clone());
    app.filters.toggle_ingredient("Paneer");
    app.filters.toggle_ingredient("Tomato");
    assert!(app.filters.cuisine.select("Indian"));
    assert!(app.filters.diet.select("Veg"));
    let (tx, _rx) = mpsc::unbounded_channel();

    assert_eq!(app.generate(&tx).await.unwrap(), 3);

    let query = backend.last_query().unwrap();
    assert_eq!(query.ingredients, ["Paneer", "Tomato"]);
    assert_eq!(query.cuisine, "Indian");
    assert_eq!(query.diet, "Veg");
    assert_eq!(query.time, "Any");
    assert_eq!(query.language, "English");

    let have: HashSet<&str> = query.ingredients.iter().map(String::as_str).collect();
    for r in app.recipes() {
        assert!(!r.shopping_list.is_empty());
        assert!(r.shopping_list.iter().all(|item| !have.contains(item.as_str())));
    }
    assert!(app.recommendations().is_none());
}
