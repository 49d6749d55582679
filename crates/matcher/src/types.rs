use canonical::CanonicalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A candidate for matching: an opaque identifier plus its ingredient text.
///
/// `text` is `None` when the upstream record had no text at all (for example
/// `"text": null` in a seed file). The matcher rejects such documents with
/// [`MatchError::InvalidInput`] instead of treating them as empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document<K> {
    /// Identifier handed back in [`MatchHit::id`].
    pub id: K,
    /// Free-text ingredient list.
    pub text: Option<String>,
}

impl<K> Document<K> {
    /// Document with ingredient text.
    pub fn new(id: K, text: impl Into<String>) -> Self {
        Self {
            id,
            text: Some(text.into()),
        }
    }

    /// Document whose text field is missing upstream.
    pub fn without_text(id: K) -> Self {
        Self { id, text: None }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Configuration for a single match call.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded
/// in the application config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum number of hits to return. Must be greater than zero.
    pub top_n: usize,
    /// Report candidates inside the top-N slice even when they share no
    /// vocabulary with the query (score 0.00). Off by default: zero-score
    /// candidates are dropped, which can shorten the result below `top_n`.
    pub include_weak_matches: bool,
}

impl MatchConfig {
    pub const DEFAULT_TOP_N: usize = 5;

    /// Default config with a different result limit.
    pub fn with_top_n(top_n: usize) -> Self {
        Self {
            top_n,
            ..Self::default()
        }
    }

    /// Validate the configuration for a single request.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.top_n == 0 {
            return Err(MatchError::InvalidArgument(
                "top_n must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_n: Self::DEFAULT_TOP_N,
            include_weak_matches: false,
        }
    }
}

/// A single hit returned by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchHit<K> {
    /// Identifier of the matched document.
    pub id: K,
    /// Relevance as a percentage in [0, 100], rounded to two decimals.
    pub score: f64,
    /// Raw cosine similarity in [0, 1] the score was derived from.
    pub similarity: f64,
}

impl<K> MatchHit<K> {
    pub(crate) fn from_similarity(id: K, similarity: f64) -> Self {
        Self {
            id,
            score: similarity_to_score(similarity),
            similarity,
        }
    }
}

/// Converts a cosine similarity into a percentage rounded to two decimals.
pub fn similarity_to_score(similarity: f64) -> f64 {
    let percent = similarity * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// A call argument is out of range (e.g. `top_n == 0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The matcher configuration cannot honor the matching contract.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// A corpus document is malformed.
    #[error("invalid input at corpus position {position}: {reason}")]
    InvalidInput { position: usize, reason: String },
    /// Text analysis failed.
    #[error("analysis error: {0}")]
    Canonical(#[from] CanonicalError),
}
