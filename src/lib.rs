//! Workspace umbrella crate for the pantry recipe finder.
//!
//! This crate stitches the recipe store and the ingredient matcher together
//! so callers can go from "what's in my fridge" to ranked recipes with a
//! single API entry point.
//!
//! ```
//! use std::sync::Arc;
//!
//! use pantry::{NewRecipe, RecipeFinder, RecipeStore, InMemoryRecipeStore};
//!
//! let store = Arc::new(InMemoryRecipeStore::new());
//! store.insert_recipe(NewRecipe::new("Fried rice", "rice egg scallion", "Fry.")).unwrap();
//! store.insert_recipe(NewRecipe::new("Omelette", "egg butter chives", "Whisk.")).unwrap();
//!
//! let finder = RecipeFinder::with_defaults(store);
//! let matches = finder.search("rice egg").unwrap();
//! assert_eq!(matches[0].recipe.name, "Fried rice");
//! ```

pub mod config;

pub use canonical::{analyze, AnalyzerConfig, CanonicalError};
pub use matcher::{
    match_documents, set_match_metrics, CorpusIndex, Document, MatchConfig, MatchError, MatchHit,
    MatchMetrics, MatchSource, Matcher,
};
pub use store::{
    load_seed, parse_seed, seed_from_str, Favorite, FavoriteState, InMemoryRecipeStore,
    NewRecipe, Rating, RatingSummary, Recipe, RecipeId, RecipeStore, RecipeUpdate, StoreError,
    UserId,
};

pub use crate::config::{ConfigLoadError, PantryConfig};

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Errors surfaced by [`RecipeFinder`].
#[derive(Debug)]
pub enum FinderError {
    Match(MatchError),
    Store(StoreError),
    NotFound(RecipeId),
}

impl fmt::Display for FinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinderError::Match(err) => write!(f, "ingredient match failed: {err}"),
            FinderError::Store(err) => write!(f, "recipe store failure: {err}"),
            FinderError::NotFound(id) => write!(f, "recipe {id} not found"),
        }
    }
}

impl Error for FinderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FinderError::Match(err) => Some(err),
            FinderError::Store(err) => Some(err),
            FinderError::NotFound(_) => None,
        }
    }
}

impl From<MatchError> for FinderError {
    fn from(value: MatchError) -> Self {
        FinderError::Match(value)
    }
}

impl From<StoreError> for FinderError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => FinderError::NotFound(id),
            other => FinderError::Store(other),
        }
    }
}

/// A recipe paired with its match score (percentage, two decimals).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMatch {
    pub recipe: Recipe,
    pub score: f64,
}

/// Everything a recipe page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub rating_summary: RatingSummary,
    pub ratings: Vec<Rating>,
    /// Always false for anonymous viewers.
    pub is_favorite: bool,
}

/// Searches a [`RecipeStore`] by ingredients.
///
/// Each search snapshots the store's corpus, so newly added, edited or
/// deleted recipes are reflected on the next call.
#[derive(Clone)]
pub struct RecipeFinder {
    store: Arc<dyn RecipeStore>,
    matcher: Matcher,
}

impl fmt::Debug for RecipeFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeFinder")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl RecipeFinder {
    pub fn new(store: Arc<dyn RecipeStore>, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    /// Finder with default analysis and `top_n = 5`.
    pub fn with_defaults(store: Arc<dyn RecipeStore>) -> Self {
        Self::new(store, Matcher::default())
    }

    pub fn from_config(store: Arc<dyn RecipeStore>, config: &PantryConfig) -> Self {
        Self::new(store, config.matcher_instance())
    }

    pub fn store(&self) -> &Arc<dyn RecipeStore> {
        &self.store
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Rank stored recipes against a free-text ingredient list.
    ///
    /// A recipe deleted between the corpus snapshot and the lookup is
    /// skipped rather than failing the whole search.
    pub fn search(&self, ingredients: &str) -> Result<Vec<RecipeMatch>, FinderError> {
        let corpus = self.store.corpus()?;
        let hits = self.matcher.match_corpus(ingredients, &corpus)?;

        let mut matches = Vec::with_capacity(hits.len());
        for hit in hits {
            match self.store.get_recipe(hit.id)? {
                Some(recipe) => matches.push(RecipeMatch {
                    recipe,
                    score: hit.score,
                }),
                None => tracing::warn!(recipe_id = %hit.id, "matched recipe vanished before lookup"),
            }
        }

        tracing::info!(
            corpus_size = corpus.len(),
            results = matches.len(),
            "recipe search complete"
        );
        Ok(matches)
    }

    /// Recipe with its ratings, average and the viewer's favorite flag.
    pub fn recipe_detail(
        &self,
        id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<RecipeDetail, FinderError> {
        let recipe = self
            .store
            .get_recipe(id)?
            .ok_or(FinderError::NotFound(id))?;
        let ratings = self.store.ratings_for(id)?;
        let rating_summary = RatingSummary::from_ratings(&ratings);
        let is_favorite = match viewer {
            Some(user) => self.store.is_favorite(user, id)?,
            None => false,
        };

        Ok(RecipeDetail {
            recipe,
            rating_summary,
            ratings,
            is_favorite,
        })
    }

    /// A user's favorite recipes, in the order they were favorited.
    pub fn dashboard(&self, user: UserId) -> Result<Vec<Recipe>, FinderError> {
        let mut recipes = Vec::new();
        for favorite in self.store.favorites_for(user)? {
            if let Some(recipe) = self.store.get_recipe(favorite.recipe_id)? {
                recipes.push(recipe);
            }
        }
        Ok(recipes)
    }
}
