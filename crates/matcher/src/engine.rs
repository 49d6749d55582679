use std::time::Instant;

use canonical::AnalyzerConfig;

use crate::metrics::{metrics_recorder, MatchSource};
use crate::types::{Document, MatchConfig, MatchError, MatchHit};
use crate::vectorizer::{cosine_similarity, TfIdfSpace};

#[cfg(test)]
mod tests;

/// Ingredient matcher.
///
/// Stateless between calls: every [`Matcher::match_corpus`] builds a fresh
/// vector space from the corpus it is given, so the vocabulary always
/// reflects the latest recipe set. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    analyzer: AnalyzerConfig,
    config: MatchConfig,
}

impl Matcher {
    /// Construct a matcher from explicit configs.
    pub fn new(analyzer: AnalyzerConfig, config: MatchConfig) -> Self {
        Self { analyzer, config }
    }

    pub fn analyzer(&self) -> &AnalyzerConfig {
        &self.analyzer
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Reject configurations `match_corpus` would refuse.
    pub fn validate(&self) -> Result<(), MatchError> {
        validate_configs(&self.analyzer, &self.config)
    }

    /// Rank `corpus` against `query` and return the best hits.
    ///
    /// An empty corpus or a query sharing no terms with any document gives
    /// an empty result. Hits are ordered by descending score; equal scores
    /// keep corpus order.
    pub fn match_corpus<K: Clone>(
        &self,
        query: &str,
        corpus: &[Document<K>],
    ) -> Result<Vec<MatchHit<K>>, MatchError> {
        validate_configs(&self.analyzer, &self.config)?;

        if corpus.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();

        // Corpus texts followed by the query as the last entry.
        let mut collection: Vec<&str> = Vec::with_capacity(corpus.len() + 1);
        for (position, doc) in corpus.iter().enumerate() {
            let text = doc.text().ok_or_else(|| MatchError::InvalidInput {
                position,
                reason: "document text is missing".into(),
            })?;
            collection.push(text);
        }
        collection.push(query);

        let space = TfIdfSpace::fit_transform(&collection, &self.analyzer);
        let (query_vector, candidates) = space
            .rows()
            .split_last()
            .ok_or_else(|| MatchError::InvalidInput {
                position: corpus.len(),
                reason: "query row missing from vector space".into(),
            })?;

        let similarities: Vec<f64> = candidates
            .iter()
            .map(|candidate| cosine_similarity(query_vector, candidate))
            .collect();

        let hits: Vec<MatchHit<K>> = rank_similarities(&similarities, &self.config)
            .into_iter()
            .map(|(position, similarity)| {
                MatchHit::from_similarity(corpus[position].id.clone(), similarity)
            })
            .collect();

        let latency = start.elapsed();
        tracing::debug!(
            corpus_size = corpus.len(),
            dimensions = space.dimensions(),
            hits = hits.len(),
            latency_us = latency.as_micros() as u64,
            "ingredient match complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(MatchSource::Scan, corpus.len(), latency, hits.len());
        }

        Ok(hits)
    }
}

/// Match `query` against `corpus` with default analysis and the given
/// result limit.
pub fn match_documents<K: Clone>(
    query: &str,
    corpus: &[Document<K>],
    top_n: usize,
) -> Result<Vec<MatchHit<K>>, MatchError> {
    Matcher::new(AnalyzerConfig::default(), MatchConfig::with_top_n(top_n))
        .match_corpus(query, corpus)
}

pub(crate) fn validate_configs(
    analyzer: &AnalyzerConfig,
    config: &MatchConfig,
) -> Result<(), MatchError> {
    config.validate()?;
    analyzer.validate()?;
    if !analyzer.lowercase {
        return Err(MatchError::InvalidConfig(
            "matching is case-insensitive; analyzer.lowercase must be enabled".into(),
        ));
    }
    Ok(())
}

/// Orders candidate positions by similarity and applies the result policy.
///
/// 1. stable sort, descending (ties keep corpus order)
/// 2. keep the first `top_n`
/// 3. drop zero-similarity candidates unless weak matches are requested,
///    and drop anything that would be reported as 0.00
pub(crate) fn rank_similarities(similarities: &[f64], config: &MatchConfig) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = similarities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(config.top_n);
    if !config.include_weak_matches {
        ranked.retain(|&(_, similarity)| {
            similarity > 0.0 && crate::types::similarity_to_score(similarity) > 0.0
        });
    }
    ranked
}
