//! Record types for recipes, favorites and ratings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Recipe primary key. Assigned by the store, increasing from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque user identifier supplied by the caller's authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Free-text ingredient list; this is what the matcher searches.
    pub ingredients: String,
    pub instructions: String,
    pub image_url: Option<String>,
    pub prep_time_minutes: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
}

impl NewRecipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            instructions: instructions.into(),
            image_url: None,
            prep_time_minutes: None,
        }
    }

    /// Name, ingredients and instructions are required and must not be blank.
    pub fn validate(&self) -> Result<(), StoreError> {
        require_text("name", &self.name)?;
        require_text("ingredients", &self.ingredients)?;
        require_text("instructions", &self.instructions)
    }
}

/// Partial update; `None` leaves a field untouched. `image_url` and
/// `prep_time_minutes` use a nested option so they can be cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub image_url: Option<Option<String>>,
    pub prep_time_minutes: Option<Option<u32>>,
}

impl RecipeUpdate {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(ingredients) = &self.ingredients {
            require_text("ingredients", ingredients)?;
        }
        if let Some(instructions) = &self.instructions {
            require_text("instructions", instructions)?;
        }
        Ok(())
    }

    pub(crate) fn apply(self, recipe: &mut Recipe) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = image_url;
        }
        if let Some(prep_time) = self.prep_time_minutes {
            recipe.prep_time_minutes = prep_time;
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// A user's favorite. At most one per (user, recipe).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    pub user_id: UserId,
    pub recipe_id: RecipeId,
    pub created_at: DateTime<Utc>,
}

/// Outcome of [`RecipeStore::toggle_favorite`](crate::RecipeStore::toggle_favorite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteState {
    Added,
    Removed,
}

/// A user's rating of a recipe. At most one per (user, recipe); rating again
/// overwrites value and comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub user_id: UserId,
    pub recipe_id: RecipeId,
    /// 1 to 5 inclusive.
    pub rating: u8,
    pub comment: Option<String>,
    pub rated_at: DateTime<Utc>,
}

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn validate_value(value: u8) -> Result<(), StoreError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(StoreError::InvalidRating(value));
        }
        Ok(())
    }
}

/// Aggregate over a recipe's ratings. `average` is 0 when unrated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatingSummary {
    pub count: usize,
    pub average: f64,
}

impl RatingSummary {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        if ratings.is_empty() {
            return Self {
                count: 0,
                average: 0.0,
            };
        }
        let total: u64 = ratings.iter().map(|r| u64::from(r.rating)).sum();
        Self {
            count: ratings.len(),
            average: total as f64 / ratings.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_rejected() {
        let recipe = NewRecipe::new("Soup", "   ", "Simmer.");
        match recipe.validate() {
            Err(StoreError::Validation(msg)) => assert!(msg.contains("ingredients")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::validate_value(1).is_ok());
        assert!(Rating::validate_value(5).is_ok());
        assert!(matches!(
            Rating::validate_value(0),
            Err(StoreError::InvalidRating(0))
        ));
        assert!(matches!(
            Rating::validate_value(6),
            Err(StoreError::InvalidRating(6))
        ));
    }

    #[test]
    fn update_can_clear_optional_fields() {
        let mut recipe = Recipe {
            id: RecipeId(1),
            name: "Toast".into(),
            ingredients: "bread butter".into(),
            instructions: "Toast it.".into(),
            image_url: Some("toast.png".into()),
            prep_time_minutes: Some(5),
            created_at: Utc::now(),
        };
        RecipeUpdate {
            name: Some("Buttered toast".into()),
            image_url: Some(None),
            ..Default::default()
        }
        .apply(&mut recipe);

        assert_eq!(recipe.name, "Buttered toast");
        assert_eq!(recipe.image_url, None);
        assert_eq!(recipe.prep_time_minutes, Some(5));
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&RecipeId(42)).expect("serialize");
        assert_eq!(json, "42");
    }
}
