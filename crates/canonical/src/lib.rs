//! Pantry text analysis layer.
//!
//! Turns free-text ingredient lists ("2 Tomatoes, chopped; 1 onion") into the
//! terms that the matcher builds its vector space from.
//!
//! ## What we do
//!
//! - Unicode normalization (NFKC by default, configurable)
//! - Locale-free lowercasing
//! - Word tokenization with byte offsets: runs of alphanumerics and `_`,
//!   everything else delimits
//! - Short-token and stop-word filtering
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same text and config give
//! the same terms on any machine. Query and corpus must go through the same
//! config, otherwise case-insensitive matching does not hold.

mod config;
mod error;
mod pipeline;
mod token;

pub use crate::config::AnalyzerConfig;
pub use crate::error::CanonicalError;
pub use crate::pipeline::{analyze, analyze_unchecked, normalize};
pub use crate::token::{tokenize, Token};
