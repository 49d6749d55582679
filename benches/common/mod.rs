//! Common utilities for pantry benchmarks
//!
//! Synthetic ingredient lists and pre-seeded stores shared by the bench
//! targets.

#![allow(dead_code)]

use std::sync::Arc;

use pantry::{Document, InMemoryRecipeStore, NewRecipe, RecipeStore};

/// Ingredient vocabulary the generators draw from.
pub const PANTRY_WORDS: &[&str] = &[
    "tomato", "onion", "garlic", "basil", "olive", "oil", "salt", "pepper", "chicken", "beef",
    "pork", "tofu", "rice", "pasta", "noodle", "egg", "butter", "flour", "sugar", "milk",
    "cream", "cheese", "feta", "parmesan", "lemon", "lime", "ginger", "soy", "sauce", "honey",
    "carrot", "celery", "potato", "leek", "spinach", "kale", "mushroom", "thyme", "rosemary",
    "cumin", "paprika", "chili", "coriander", "yogurt", "cucumber", "avocado", "bread", "stock",
];

pub const SAMPLE_QUERY: &str = "tomato garlic basil olive oil pasta";

/// Deterministic ingredient list of `len` words for recipe `seed`.
pub fn ingredient_list(seed: usize, len: usize) -> String {
    (0..len)
        .map(|i| PANTRY_WORDS[(seed * 7 + i * 13) % PANTRY_WORDS.len()])
        .collect::<Vec<_>>()
        .join(", ")
}

/// A corpus of `size` documents with 6 to 11 ingredients each.
pub fn sample_corpus(size: usize) -> Vec<Document<usize>> {
    (0..size)
        .map(|i| Document::new(i, ingredient_list(i, 6 + i % 6)))
        .collect()
}

/// An in-memory store holding `size` generated recipes.
pub fn seeded_store(size: usize) -> Arc<InMemoryRecipeStore> {
    let store = Arc::new(InMemoryRecipeStore::new());
    for i in 0..size {
        store
            .insert_recipe(NewRecipe::new(
                format!("Recipe {i}"),
                ingredient_list(i, 6 + i % 6),
                "Combine and cook.",
            ))
            .expect("insert should succeed");
    }
    store
}
