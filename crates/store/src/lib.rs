//! Pantry recipe storage.
//!
//! Holds recipes plus the per-user favorites and ratings that reference them,
//! behind the [`RecipeStore`] trait. The store is the upstream supplier of the
//! matcher's corpus: [`RecipeStore::corpus`] snapshots every recipe's
//! ingredient text in id order.
//!
//! User accounts are not managed here. Callers pass an opaque [`UserId`]
//! obtained from whatever authentication layer they run.
//!
//! ```
//! use store::{InMemoryRecipeStore, NewRecipe, RecipeStore, UserId};
//!
//! let store = InMemoryRecipeStore::new();
//! let soup = store
//!     .insert_recipe(NewRecipe::new("Leek soup", "leek, potato, stock", "Simmer."))
//!     .expect("insert");
//! store.rate_recipe(UserId(1), soup.id, 4, None).expect("rate");
//!
//! assert_eq!(store.corpus().expect("corpus").len(), 1);
//! assert_eq!(store.rating_summary(soup.id).expect("summary").average, 4.0);
//! ```

mod backend;
mod error;
mod seed;
mod types;

pub use crate::backend::{InMemoryRecipeStore, RecipeStore};
pub use crate::error::StoreError;
pub use crate::seed::{load_seed, parse_seed, seed_from_str};
pub use crate::types::{
    Favorite, FavoriteState, NewRecipe, Rating, RatingSummary, Recipe, RecipeId, RecipeUpdate,
    UserId,
};
