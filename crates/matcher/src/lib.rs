//! # Pantry Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` ranks recipes by how well their ingredient lists match a
//! free-text ingredient query. Query and recipe texts are analyzed with
//! [`canonical`], turned into TF-IDF vectors over a shared vocabulary, and
//! compared with cosine similarity.
//!
//! The matcher never reaches into a store: callers pass the corpus in on
//! every call, and get back identifiers with scores.
//!
//! ## Core Types
//!
//! - [`Document`]: opaque identifier + ingredient text.
//! - [`MatchConfig`]: `top_n` and the opt-in `include_weak_matches` flag.
//! - [`MatchHit`]: identifier, percentage score (two decimals) and raw
//!   similarity.
//! - [`Matcher`]: rebuilds the vector space per call.
//! - [`CorpusIndex`]: incrementally maintained alternative with the same
//!   observable ranking.
//!
//! ## Ranking rules
//!
//! 1. Similarity is the cosine between the query row and each candidate row;
//!    zero-magnitude rows score 0.
//! 2. Candidates are stable-sorted by similarity, descending, so equal
//!    scores keep corpus order.
//! 3. The first `top_n` are kept, then zero-similarity candidates are
//!    dropped. Results can therefore be shorter than `top_n`, or empty.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{match_documents, Document};
//!
//! let corpus = vec![
//!     Document::new(1, "chicken rice garlic"),
//!     Document::new(2, "beef rice onion"),
//! ];
//!
//! let hits = match_documents("rice garlic", &corpus, 5).expect("match");
//! assert_eq!(hits[0].id, 1);
//! assert!(hits[0].score > hits[1].score);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-call latency and hit counts. Per-call stats are also emitted as
//! `tracing` debug events.

pub mod engine;
pub mod index;
pub mod metrics;
pub mod types;
pub mod vectorizer;

pub use crate::engine::{match_documents, Matcher};
pub use crate::index::CorpusIndex;
pub use crate::metrics::{set_match_metrics, MatchMetrics, MatchSource};
pub use crate::types::{similarity_to_score, Document, MatchConfig, MatchError, MatchHit};
pub use crate::vectorizer::{cosine_similarity, smoothed_idf, SparseVector, TfIdfSpace};
pub use canonical::AnalyzerConfig;
