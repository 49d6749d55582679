//! Incrementally maintained corpus index.
//!
//! [`Matcher::match_corpus`](crate::Matcher::match_corpus) rebuilds its vector
//! space on every call. `CorpusIndex` keeps per-document term counts and
//! corpus document frequencies instead, so a query only pays for the idf
//! table and one pass over the postings. Rankings and scores agree with the
//! from-scratch path: the query still counts as a member of the collection
//! (`n = documents + 1`, and its terms bump their document frequency).

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use canonical::{analyze_unchecked, AnalyzerConfig};
use fxhash::FxHashMap;

use crate::engine::{rank_similarities, validate_configs};
use crate::metrics::{metrics_recorder, MatchSource};
use crate::types::{Document, MatchConfig, MatchError, MatchHit};
use crate::vectorizer::{count_terms, smoothed_idf, TermId};

#[derive(Debug, Clone)]
struct IndexedDocument<K> {
    id: K,
    /// Term counts sorted by term id.
    terms: Vec<(TermId, u32)>,
}

/// Ingredient index that is updated in place as recipes change.
///
/// Documents keep insertion order, which is the tie-break order for equal
/// scores. Upserting an existing id replaces its text without moving it.
#[derive(Debug, Clone)]
pub struct CorpusIndex<K> {
    analyzer: AnalyzerConfig,
    vocabulary: FxHashMap<String, TermId>,
    doc_freq: Vec<usize>,
    documents: Vec<IndexedDocument<K>>,
    positions: HashMap<K, usize>,
}

impl<K> CorpusIndex<K>
where
    K: Clone + Eq + Hash,
{
    /// Create an empty index. Fails when `analyzer` cannot support
    /// case-insensitive matching.
    pub fn new(analyzer: AnalyzerConfig) -> Result<Self, MatchError> {
        validate_configs(&analyzer, &MatchConfig::default())?;
        Ok(Self {
            analyzer,
            vocabulary: FxHashMap::default(),
            doc_freq: Vec::new(),
            documents: Vec::new(),
            positions: HashMap::new(),
        })
    }

    /// Build an index from a corpus in one go.
    pub fn from_documents(
        analyzer: AnalyzerConfig,
        corpus: &[Document<K>],
    ) -> Result<Self, MatchError> {
        let mut index = Self::new(analyzer)?;
        for (position, doc) in corpus.iter().enumerate() {
            index.upsert(doc).map_err(|err| match err {
                MatchError::InvalidInput { reason, .. } => {
                    MatchError::InvalidInput { position, reason }
                }
                other => other,
            })?;
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.positions.contains_key(id)
    }

    /// Insert a document, or replace the text of an existing one.
    pub fn upsert(&mut self, doc: &Document<K>) -> Result<(), MatchError> {
        let text = doc.text().ok_or_else(|| MatchError::InvalidInput {
            position: self.positions.get(&doc.id).copied().unwrap_or(self.len()),
            reason: "document text is missing".into(),
        })?;

        let mut terms = count_terms(analyze_unchecked(text, &self.analyzer), &mut self.vocabulary);
        terms.sort_unstable_by_key(|(term, _)| *term);
        self.doc_freq.resize(self.vocabulary.len(), 0);
        for (term, _) in &terms {
            self.doc_freq[*term] += 1;
        }

        match self.positions.get(&doc.id).copied() {
            Some(position) => {
                let previous = std::mem::replace(&mut self.documents[position].terms, terms);
                self.release_terms(&previous);
            }
            None => {
                self.positions.insert(doc.id.clone(), self.documents.len());
                self.documents.push(IndexedDocument {
                    id: doc.id.clone(),
                    terms,
                });
            }
        }
        Ok(())
    }

    /// Remove a document. Returns `false` if it was not indexed.
    pub fn remove(&mut self, id: &K) -> bool {
        let Some(position) = self.positions.remove(id) else {
            return false;
        };
        let removed = self.documents.remove(position);
        self.release_terms(&removed.terms);
        for doc in &self.documents[position..] {
            if let Some(slot) = self.positions.get_mut(&doc.id) {
                *slot -= 1;
            }
        }
        true
    }

    fn release_terms(&mut self, terms: &[(TermId, u32)]) {
        for (term, _) in terms {
            self.doc_freq[*term] = self.doc_freq[*term].saturating_sub(1);
        }
    }

    /// Rank the indexed documents against `query`.
    pub fn search(&self, query: &str, config: &MatchConfig) -> Result<Vec<MatchHit<K>>, MatchError> {
        config.validate()?;
        if self.documents.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let n_docs = self.documents.len() + 1;

        // Query terms: known terms by id, unseen terms only count toward the
        // query's own magnitude.
        let mut query_known: FxHashMap<TermId, u32> = FxHashMap::default();
        let mut query_unseen: FxHashMap<String, u32> = FxHashMap::default();
        for term in analyze_unchecked(query, &self.analyzer) {
            match self.vocabulary.get(&term) {
                Some(&id) => *query_known.entry(id).or_insert(0) += 1,
                None => *query_unseen.entry(term).or_insert(0) += 1,
            }
        }

        let idf: Vec<f64> = self
            .doc_freq
            .iter()
            .enumerate()
            .map(|(term, &df)| {
                let in_query = usize::from(query_known.contains_key(&term));
                smoothed_idf(n_docs, df + in_query)
            })
            .collect();
        let unseen_idf = smoothed_idf(n_docs, 1);

        let mut query_weights: Vec<(TermId, f64)> = query_known
            .iter()
            .map(|(&term, &tf)| (term, f64::from(tf) * idf[term]))
            .collect();
        query_weights.sort_unstable_by_key(|(term, _)| *term);
        let query_norm = query_weights
            .iter()
            .map(|(_, w)| w * w)
            .chain(query_unseen.values().map(|&tf| {
                let w = f64::from(tf) * unseen_idf;
                w * w
            }))
            .sum::<f64>()
            .sqrt();

        let similarities: Vec<f64> = self
            .documents
            .iter()
            .map(|doc| {
                let mut dot = 0.0;
                let mut norm_sq = 0.0;
                for &(term, tf) in &doc.terms {
                    let weight = f64::from(tf) * idf[term];
                    norm_sq += weight * weight;
                    if let Ok(slot) = query_weights.binary_search_by_key(&term, |(t, _)| *t) {
                        dot += weight * query_weights[slot].1;
                    }
                }
                let denom = norm_sq.sqrt() * query_norm;
                if denom == 0.0 {
                    0.0
                } else {
                    (dot / denom).clamp(0.0, 1.0)
                }
            })
            .collect();

        let hits: Vec<MatchHit<K>> = rank_similarities(&similarities, config)
            .into_iter()
            .map(|(position, similarity)| {
                MatchHit::from_similarity(self.documents[position].id.clone(), similarity)
            })
            .collect();

        let latency = start.elapsed();
        tracing::debug!(
            corpus_size = self.documents.len(),
            hits = hits.len(),
            latency_us = latency.as_micros() as u64,
            "indexed ingredient match complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(MatchSource::Index, self.documents.len(), latency, hits.len());
        }

        Ok(hits)
    }
}
