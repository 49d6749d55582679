//! TF-IDF vector space over a small text collection.
//!
//! Weights are raw term counts times the smoothed inverse document frequency
//!
//! ```text
//! idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! where `n` is the number of texts in the collection and `df(t)` the number
//! of texts containing `t`. The `+1` terms keep the ratio finite and give
//! terms present everywhere a weight of 1 instead of 0.

use canonical::{analyze_unchecked, AnalyzerConfig};
use fxhash::FxHashMap;

pub(crate) type TermId = usize;

/// Smoothed inverse document frequency.
pub fn smoothed_idf(n_docs: usize, doc_freq: usize) -> f64 {
    ((1 + n_docs) as f64 / (1 + doc_freq) as f64).ln() + 1.0
}

/// Sparse vector with entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
    norm: f64,
}

impl SparseVector {
    /// Builds a vector from `(term, weight)` pairs. Pairs are sorted by term
    /// so norms and dot products sum in a fixed order.
    pub(crate) fn from_weights(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.sort_unstable_by_key(|(term, _)| *term);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { entries, norm }
    }

    /// Euclidean magnitude.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Number of non-zero components.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }

    /// Dot product via a merge over the sorted entries.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity between two vectors; 0 when either has zero magnitude.
///
/// Weights are non-negative so the result lies in [0, 1]; it is clamped to
/// absorb rounding above 1.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Counts term occurrences, interning new terms into `vocabulary`.
/// Returned pairs are in first-appearance order.
pub(crate) fn count_terms(
    terms: Vec<String>,
    vocabulary: &mut FxHashMap<String, TermId>,
) -> Vec<(TermId, u32)> {
    let mut counts: Vec<(TermId, u32)> = Vec::new();
    let mut slots: FxHashMap<TermId, usize> = FxHashMap::default();
    for term in terms {
        let next_id = vocabulary.len();
        let id = *vocabulary.entry(term).or_insert(next_id);
        match slots.get(&id) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(id, counts.len());
                counts.push((id, 1));
            }
        }
    }
    counts
}

/// A TF-IDF vector space fitted to one collection of texts.
///
/// Built from scratch on every call; nothing is shared between spaces.
#[derive(Debug, Clone)]
pub struct TfIdfSpace {
    vocabulary: FxHashMap<String, TermId>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TfIdfSpace {
    /// Analyzes every text with `cfg` and builds one row per text, in input
    /// order. `cfg` must already be validated.
    pub fn fit_transform<S: AsRef<str>>(texts: &[S], cfg: &AnalyzerConfig) -> Self {
        let mut vocabulary: FxHashMap<String, TermId> = FxHashMap::default();
        let counted: Vec<Vec<(TermId, u32)>> = texts
            .iter()
            .map(|text| count_terms(analyze_unchecked(text.as_ref(), cfg), &mut vocabulary))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for counts in &counted {
            for (term, _) in counts {
                doc_freq[*term] += 1;
            }
        }

        let n_docs = texts.len();
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| smoothed_idf(n_docs, df))
            .collect();

        let rows = counted
            .into_iter()
            .map(|counts| {
                SparseVector::from_weights(
                    counts
                        .into_iter()
                        .map(|(term, tf)| (term, f64::from(tf) * idf[term]))
                        .collect(),
                )
            })
            .collect();

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Number of distinct terms (dimensions).
    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    /// Inverse document frequency of `term`, if it occurs in the collection.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&id| self.idf[id])
    }
}
