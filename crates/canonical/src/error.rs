use thiserror::Error;

/// Errors that can occur during text analysis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid analyzer configuration: {0}")]
    InvalidConfig(String),
}
