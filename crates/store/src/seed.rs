//! JSON seed files for populating a store.
//!
//! Two shapes are accepted: a bare array of recipes, or an object with a
//! `recipes` array.
//!
//! ```json
//! { "recipes": [
//!     { "name": "Garlic rice", "ingredients": "rice, garlic, butter",
//!       "instructions": "Fry garlic, add rice.", "prep_time_minutes": 20 }
//! ] }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::backend::RecipeStore;
use crate::error::StoreError;
use crate::types::NewRecipe;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedFile {
    List(Vec<NewRecipe>),
    Wrapped { recipes: Vec<NewRecipe> },
}

impl SeedFile {
    fn into_recipes(self) -> Vec<NewRecipe> {
        match self {
            SeedFile::List(recipes) | SeedFile::Wrapped { recipes } => recipes,
        }
    }
}

/// Parse seed JSON into recipe inputs without touching a store.
pub fn parse_seed(json: &str) -> Result<Vec<NewRecipe>, StoreError> {
    let seed: SeedFile = serde_json::from_str(json)?;
    Ok(seed.into_recipes())
}

/// Insert every recipe from `json` into `store`, in file order.
///
/// All recipes are validated before the first insert, so an invalid entry
/// leaves the store untouched. Returns the number of recipes inserted.
pub fn seed_from_str(store: &dyn RecipeStore, json: &str) -> Result<usize, StoreError> {
    let recipes = parse_seed(json)?;
    for (position, recipe) in recipes.iter().enumerate() {
        recipe.validate().map_err(|err| match err {
            StoreError::Validation(msg) => {
                StoreError::Validation(format!("seed entry {position}: {msg}"))
            }
            other => other,
        })?;
    }

    let count = recipes.len();
    for recipe in recipes {
        store.insert_recipe(recipe)?;
    }
    tracing::info!(recipes = count, "store seeded");
    Ok(count)
}

/// Read a seed file from disk and insert its recipes into `store`.
pub fn load_seed(store: &dyn RecipeStore, path: impl AsRef<Path>) -> Result<usize, StoreError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| StoreError::SeedRead {
        path: path.to_path_buf(),
        source,
    })?;
    seed_from_str(store, &json)
}
