use std::path::PathBuf;

use thiserror::Error;

use crate::types::RecipeId;

/// Errors produced by recipe storage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The referenced recipe does not exist.
    #[error("recipe {0} not found")]
    NotFound(RecipeId),

    /// A record failed validation (empty name, empty ingredients, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Ratings must be between 1 and 5 inclusive.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// The storage backend failed (e.g. a poisoned lock).
    #[error("backend error: {0}")]
    Backend(String),

    /// A seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A seed file is not valid JSON for the seed schema.
    #[error("failed to parse seed file: {0}")]
    SeedParse(#[from] serde_json::Error),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
