//! Configuration types for ingredient text analysis.
//!
//! [`AnalyzerConfig`] controls how free-text ingredient lists are normalized
//! and split into terms before they reach the vector space.
//!
//! # Versioning
//!
//! Any change to analysis behavior that moves scores must come with a version
//! bump, so stored scores can be traced back to the analyzer that produced
//! them.
//!
//! # Examples
//!
//! ```rust
//! use canonical::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.lowercase);
//! assert_eq!(config.min_token_chars, 2);
//! ```
//!
//! ## Dropping filler words
//!
//! ```rust
//! use canonical::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::default().with_stop_words(["of", "and", "fresh"]);
//! assert!(config.is_stop_word("fresh"));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the analysis pipeline.
///
/// Cheap to clone and serde-friendly so it can be embedded in the
/// application config file.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "lowercase": true,
///   "min_token_chars": 2,
///   "stop_words": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Version of the analysis behavior. Must be >= 1.
    pub version: u32,

    /// Apply Unicode NFKC normalization before case folding.
    ///
    /// With normalization on, `"Jalape\u{00F1}o"` and `"Jalapen\u{0303}o"`
    /// produce the same term.
    pub normalize_unicode: bool,

    /// Apply locale-free Unicode lowercasing.
    ///
    /// Query and corpus are always analyzed with the same config, so
    /// `"Tomato"` and `"tomato"` only collapse into one term when this is on.
    pub lowercase: bool,

    /// Minimum number of characters a word needs to become a term.
    ///
    /// The default of 2 drops stray single letters such as the "s" left
    /// behind by `"tomato's"`.
    pub min_token_chars: usize,

    /// Terms removed after tokenization. Compared against the normalized
    /// token, so entries should be lowercase when `lowercase` is on.
    pub stop_words: BTreeSet<String>,
}

impl AnalyzerConfig {
    /// Replace the stop-word list.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` when `token` is on the stop-word list.
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.min_token_chars == 0 {
            return Err(CanonicalError::InvalidConfig(
                "min_token_chars must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            min_token_chars: 2,
            stop_words: BTreeSet::new(),
        }
    }
}
