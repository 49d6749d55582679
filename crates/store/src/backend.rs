use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use matcher::Document;

use crate::error::StoreError;
use crate::types::{
    Favorite, FavoriteState, NewRecipe, Rating, RatingSummary, Recipe, RecipeId, RecipeUpdate,
    UserId,
};

/// Storage for recipes and the per-user records hanging off them.
///
/// This allows for different storage implementations; the crate ships an
/// in-memory one. Implementations must be safe to share across threads.
pub trait RecipeStore: Send + Sync {
    /// Validate and store a new recipe, assigning its id.
    fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;
    /// Apply a partial update to an existing recipe.
    fn update_recipe(&self, id: RecipeId, update: RecipeUpdate) -> Result<Recipe, StoreError>;
    /// Delete a recipe along with its favorites and ratings.
    fn delete_recipe(&self, id: RecipeId) -> Result<Recipe, StoreError>;
    /// Retrieve a recipe by id.
    fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError>;
    /// All recipes in id order.
    fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError>;
    fn recipe_count(&self) -> Result<usize, StoreError>;

    /// Add the favorite if absent, remove it if present.
    fn toggle_favorite(&self, user: UserId, recipe: RecipeId)
        -> Result<FavoriteState, StoreError>;
    fn is_favorite(&self, user: UserId, recipe: RecipeId) -> Result<bool, StoreError>;
    /// A user's favorites, oldest first.
    fn favorites_for(&self, user: UserId) -> Result<Vec<Favorite>, StoreError> {
        let mut favorites: Vec<(u64, Favorite)> = self
            .favorites
            .iter()
            .filter(|entry| entry.key().0 == user)
            .map(|entry| entry.value().clone())
            .collect();
        favorites.sort_unstable_by_key(|(seq, _)| *seq);
        Ok(favorites.into_iter().map(|(_, favorite)| favorite).collect())
    }

    fn rate_recipe(
        &self,
        user: UserId,
        recipe: RecipeId,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Rating, StoreError>;
    /// All ratings of a recipe, oldest first.
    fn ratings_for(&self, recipe: RecipeId) -> Result<Vec<Rating>, StoreError>;

    fn rating_summary(&self, recipe: RecipeId) -> Result<RatingSummary, StoreError> {
        Ok(RatingSummary::from_ratings(&self.ratings_for(recipe)?))
    }

    /// Snapshot of every recipe's ingredient text, in id order, for the
    /// matcher.
    fn corpus(&self) -> Result<Vec<Document<RecipeId>>, StoreError> {
        Ok(self
            .list_recipes()?
            .into_iter()
            .map(|recipe| Document::new(recipe.id, recipe.ingredients))
            .collect())
    }
}

/// An in-memory store: recipes in an ordered map behind a `RwLock`,
/// favorites and ratings in concurrent maps keyed by (user, recipe).
///
/// Operations touching favorites or ratings hold the recipe read lock, and
/// deletion holds the write lock while it cascades, so no favorite or
/// rating can outlive its recipe.
pub struct InMemoryRecipeStore {
    recipes: RwLock<BTreeMap<RecipeId, Recipe>>,
    next_id: AtomicU64,
    /// Each favorite carries an insertion sequence so listings keep the
    /// order favorites were added, even when timestamps collide.
    favorites: DashMap<(UserId, RecipeId), (u64, Favorite)>,
    favorite_seq: AtomicU64,
    ratings: DashMap<(UserId, RecipeId), Rating>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self {
            recipes: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            favorites: DashMap::new(),
            favorite_seq: AtomicU64::new(0),
            ratings: DashMap::new(),
        }
    }

    fn read_recipes(&self) -> Result<RwLockReadGuard<'_, BTreeMap<RecipeId, Recipe>>, StoreError> {
        self.recipes
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))
    }

    fn write_recipes(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<RecipeId, Recipe>>, StoreError> {
        self.recipes
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))
    }
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        recipe.validate()?;
        let mut guard = self.write_recipes()?;
        let id = RecipeId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Recipe {
            id,
            name: recipe.name,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            image_url: recipe.image_url,
            prep_time_minutes: recipe.prep_time_minutes,
            created_at: Utc::now(),
        };
        guard.insert(id, stored.clone());
        tracing::debug!(recipe_id = %id, "recipe stored");
        Ok(stored)
    }

    fn update_recipe(&self, id: RecipeId, update: RecipeUpdate) -> Result<Recipe, StoreError> {
        update.validate()?;
        let mut guard = self.write_recipes()?;
        let recipe = guard.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        update.apply(recipe);
        Ok(recipe.clone())
    }

    fn delete_recipe(&self, id: RecipeId) -> Result<Recipe, StoreError> {
        let mut guard = self.write_recipes()?;
        let removed = guard.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.favorites.retain(|(_, recipe_id), _| *recipe_id != id);
        self.ratings.retain(|(_, recipe_id), _| *recipe_id != id);
        tracing::debug!(recipe_id = %id, "recipe deleted with favorites and ratings");
        Ok(removed)
    }

    fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        Ok(self.read_recipes()?.get(&id).cloned())
    }

    fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.read_recipes()?.values().cloned().collect())
    }

    fn recipe_count(&self) -> Result<usize, StoreError> {
        Ok(self.read_recipes()?.len())
    }

    fn toggle_favorite(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<FavoriteState, StoreError> {
        let guard = self.read_recipes()?;
        if !guard.contains_key(&recipe) {
            return Err(StoreError::NotFound(recipe));
        }
        // The entry guard holds the shard lock across check and update.
        match self.favorites.entry((user, recipe)) {
            Entry::Occupied(entry) => {
                entry.remove();
                Ok(FavoriteState::Removed)
            }
            Entry::Vacant(entry) => {
                let seq = self.favorite_seq.fetch_add(1, Ordering::SeqCst);
                entry.insert((
                    seq,
                    Favorite {
                        user_id: user,
                        recipe_id: recipe,
                        created_at: Utc::now(),
                    },
                ));
                Ok(FavoriteState::Added)
            }
        }
    }

    fn is_favorite(&self, user: UserId, recipe: RecipeId) -> Result<bool, StoreError> {
        Ok(self.favorites.contains_key(&(user, recipe)))
    }

    fn favorites_for(&self, user: UserId) -> Result<Vec<Favorite>, StoreError> {
        let mut favorites: Vec<Favorite> = self
            .favorites
            .iter()
            .filter(|entry| entry.key().0 == user)
            .map(|entry| entry.value().clone())
            .collect();
        favorites.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.recipe_id.cmp(&b.recipe_id))
        });
        Ok(favorites)
    }

    fn rate_recipe(
        &self,
        user: UserId,
        recipe: RecipeId,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Rating, StoreError> {
        Rating::validate_value(rating)?;
        let guard = self.read_recipes()?;
        if !guard.contains_key(&recipe) {
            return Err(StoreError::NotFound(recipe));
        }
        let stored = Rating {
            user_id: user,
            recipe_id: recipe,
            rating,
            comment: comment.filter(|c| !c.trim().is_empty()),
            rated_at: Utc::now(),
        };
        self.ratings.insert((user, recipe), stored.clone());
        Ok(stored)
    }

    fn ratings_for(&self, recipe: RecipeId) -> Result<Vec<Rating>, StoreError> {
        let mut ratings: Vec<Rating> = self
            .ratings
            .iter()
            .filter(|entry| entry.key().1 == recipe)
            .map(|entry| entry.value().clone())
            .collect();
        ratings.sort_by(|a, b| a.rated_at.cmp(&b.rated_at).then(a.user_id.cmp(&b.user_id)));
        Ok(ratings)
    }
}
