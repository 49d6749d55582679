use std::sync::Arc;

use anyhow::{bail, Context};
use pantry::{load_seed, InMemoryRecipeStore, PantryConfig, RecipeFinder, RecipeStore};

const USAGE: &str = "usage: pantry [--seed-only] <ingredients...>";

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; everything has a default.
    dotenvy::dotenv().ok();

    let config = PantryConfig::load().context("loading configuration")?;
    init_tracing(&config);

    let store = Arc::new(InMemoryRecipeStore::new());
    match &config.seed_path {
        Some(path) => {
            load_seed(store.as_ref(), path)
                .with_context(|| format!("seeding from {}", path.display()))?;
        }
        None => tracing::warn!("no seed_path configured, starting with an empty store"),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--seed-only") {
        println!("{} recipes loaded", store.recipe_count()?);
        return Ok(());
    }

    let query = args.join(" ");
    if query.trim().is_empty() {
        bail!(USAGE);
    }

    let finder = RecipeFinder::from_config(store, &config);
    let matches = finder.search(&query)?;
    if matches.is_empty() {
        println!("no matches found");
        return Ok(());
    }

    for found in matches {
        println!(
            "{:>6.2}%  #{:<4} {}",
            found.score, found.recipe.id, found.recipe.name
        );
    }
    Ok(())
}

fn init_tracing(config: &PantryConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
