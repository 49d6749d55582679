use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::metrics::{set_match_metrics, MatchMetrics};

fn doc(id: u32, text: &str) -> Document<u32> {
    Document::new(id, text)
}

fn kitchen_corpus() -> Vec<Document<u32>> {
    vec![
        doc(1, "chicken, rice, garlic, soy sauce"),
        doc(2, "beef, rice, onion, carrots"),
        doc(3, "pasta, tomato, basil, garlic, olive oil"),
        doc(4, "tomato, onion, cucumber, feta"),
        doc(5, "flour, butter, sugar, eggs"),
        doc(6, "rice, coconut milk, mango"),
        doc(7, ""),
    ]
}

fn ids<K: Clone>(hits: &[MatchHit<K>]) -> Vec<K> {
    hits.iter().map(|hit| hit.id.clone()).collect()
}

fn assert_ranked(hits: &[MatchHit<u32>], top_n: usize) {
    assert!(hits.len() <= top_n, "more hits than top_n");
    for hit in hits {
        assert!(hit.score > 0.0, "zero score returned for {}", hit.id);
        assert!(hit.score <= 100.0);
        assert!(hit.similarity > 0.0 && hit.similarity <= 1.0);
    }
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score, "scores not descending");
    }
}

#[test]
fn closer_recipe_ranks_first() {
    let corpus = vec![doc(1, "chicken rice garlic"), doc(2, "beef rice onion")];
    let hits = match_documents("rice garlic", &corpus, 5).expect("match");

    assert_eq!(ids(&hits), vec![1, 2]);
    assert!(hits[0].score > hits[1].score);
    assert!(hits[1].score > 0.0);
    // ln-smoothed idf over 3 texts: sim(query, doc1) ~ 0.694, sim(query, doc2) ~ 0.236
    assert!((hits[0].score - 69.4).abs() < 0.1, "got {}", hits[0].score);
    assert!((hits[1].score - 23.6).abs() < 0.1, "got {}", hits[1].score);
}

#[test]
fn no_shared_vocabulary_returns_empty() {
    let corpus = vec![doc(1, "pasta tomato")];
    let hits = match_documents("banana yogurt", &corpus, 5).expect("match");
    assert!(hits.is_empty());
}

#[test]
fn empty_corpus_returns_empty() {
    let corpus: Vec<Document<u32>> = Vec::new();
    for top_n in [1, 5, 100] {
        let hits = match_documents("anything", &corpus, top_n).expect("match");
        assert!(hits.is_empty());
    }
}

#[test]
fn ties_keep_corpus_order_within_top_n() {
    let corpus: Vec<Document<u32>> = (0..10).map(|i| doc(i, "salt")).collect();
    let hits = match_documents("salt", &corpus, 3).expect("match");

    assert_eq!(ids(&hits), vec![0, 1, 2]);
    assert!(hits.iter().all(|hit| hit.score == 100.0));
}

#[test]
fn shared_term_with_varied_extras_sorted_descending() {
    let corpus: Vec<Document<u32>> = (0..10)
        .map(|i| {
            let extras: Vec<String> = (0..i).map(|j| format!("spice{j}")).collect();
            doc(i, &format!("salt {}", extras.join(" ")))
        })
        .collect();
    let hits = match_documents("salt", &corpus, 3).expect("match");

    assert_eq!(hits.len(), 3);
    assert_eq!(ids(&hits), vec![0, 1, 2]);
    assert!(hits[0].score > hits[1].score);
    assert!(hits[1].score > hits[2].score);
}

#[test]
fn equal_scores_preserve_original_order() {
    let corpus = vec![
        doc(10, "salt pepper"),
        doc(20, "salt"),
        doc(30, "salt"),
    ];
    let hits = match_documents("salt", &corpus, 5).expect("match");
    assert_eq!(ids(&hits), vec![20, 30, 10]);
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn case_insensitive_query_and_corpus() {
    let corpus = vec![
        doc(1, "TOMATO, Onion, garlic"),
        doc(2, "tomato sauce"),
        doc(3, "onion rings"),
    ];
    let upper = match_documents("Tomato, Onion", &corpus, 5).expect("upper");
    let lower = match_documents("tomato, onion", &corpus, 5).expect("lower");
    assert_eq!(upper, lower);
    assert_eq!(upper[0].id, 1);
}

#[test]
fn repeated_calls_are_identical() {
    let corpus = kitchen_corpus();
    let first = match_documents("garlic tomato", &corpus, 5).expect("first");
    let second = match_documents("garlic tomato", &corpus, 5).expect("second");
    assert_eq!(first, second);
}

#[test]
fn results_respect_top_n_and_positive_count() {
    let corpus = kitchen_corpus();
    let queries = [
        "rice",
        "garlic tomato onion",
        "eggs",
        "mango coconut rice",
        "nothing shared here",
        "",
    ];
    for query in queries {
        for top_n in [1, 2, 3, 5, 10] {
            let hits = match_documents(query, &corpus, top_n).expect("match");
            assert_ranked(&hits, top_n);

            let all = match_documents(query, &corpus, corpus.len()).expect("all");
            assert!(hits.len() <= all.len());
        }
    }
}

#[test]
fn empty_text_document_never_matches() {
    let corpus = vec![doc(1, ""), doc(2, "  ;  "), doc(3, "rice")];
    let hits = match_documents("rice", &corpus, 5).expect("match");
    assert_eq!(ids(&hits), vec![3]);
}

#[test]
fn all_stop_word_document_never_matches() {
    let analyzer = AnalyzerConfig::default().with_stop_words(["of", "and"]);
    let matcher = Matcher::new(analyzer, MatchConfig::default());
    let corpus = vec![doc(1, "of and"), doc(2, "salt and pepper")];
    let hits = matcher.match_corpus("salt of", &corpus).expect("match");
    assert_eq!(ids(&hits), vec![2]);
}

#[test]
fn empty_query_returns_empty() {
    let hits = match_documents("", &kitchen_corpus(), 5).expect("match");
    assert!(hits.is_empty());
}

#[test]
fn zero_top_n_is_invalid_argument() {
    let err = match_documents("rice", &kitchen_corpus(), 0).expect_err("should fail");
    assert!(matches!(err, MatchError::InvalidArgument(_)));
}

#[test]
fn missing_text_fails_fast() {
    let corpus = vec![
        doc(1, "rice"),
        Document::without_text(2),
        doc(3, "rice beans"),
    ];
    let err = match_documents("rice", &corpus, 5).expect_err("should fail");
    match err {
        MatchError::InvalidInput { position, reason } => {
            assert_eq!(position, 1);
            assert!(reason.contains("missing"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn case_sensitive_analyzer_rejected() {
    let analyzer = AnalyzerConfig {
        lowercase: false,
        ..Default::default()
    };
    let matcher = Matcher::new(analyzer, MatchConfig::default());
    let err = matcher
        .match_corpus("rice", &kitchen_corpus())
        .expect_err("should fail");
    assert!(matches!(err, MatchError::InvalidConfig(_)));
}

#[test]
fn invalid_analyzer_version_bubbles_up() {
    let analyzer = AnalyzerConfig {
        version: 0,
        ..Default::default()
    };
    let matcher = Matcher::new(analyzer, MatchConfig::default());
    let err = matcher
        .match_corpus("rice", &kitchen_corpus())
        .expect_err("should fail");
    assert!(matches!(err, MatchError::Canonical(_)));
}

#[test]
fn weak_matches_keep_zero_scores_inside_top_n() {
    let corpus = vec![doc(1, "pasta tomato"), doc(2, "rice"), doc(3, "beans")];
    let matcher = Matcher::new(
        AnalyzerConfig::default(),
        MatchConfig {
            top_n: 2,
            include_weak_matches: true,
        },
    );
    let hits = matcher.match_corpus("rice", &corpus).expect("match");
    assert_eq!(ids(&hits), vec![2, 1]);
    assert_eq!(hits[0].score, 100.0);
    assert_eq!(hits[1].score, 0.0);

    let strict = match_documents("rice", &corpus, 2).expect("strict");
    assert_eq!(ids(&strict), vec![2]);
}

fn diluted_salt_corpus() -> Vec<Document<u32>> {
    // One shared term drowned in 50k copies of another: positive similarity
    // that rounds to a 0.00 score.
    let text = format!("salt {}", "pepper ".repeat(50_000));
    vec![doc(1, &text)]
}

#[test]
fn positive_similarity_rounding_to_zero_is_dropped() {
    let hits = match_documents("salt", &diluted_salt_corpus(), 5).expect("match");
    assert!(hits.is_empty());
}

#[test]
fn weak_matches_keep_hits_rounding_to_zero() {
    let matcher = Matcher::new(
        AnalyzerConfig::default(),
        MatchConfig {
            top_n: 5,
            include_weak_matches: true,
        },
    );
    let hits = matcher
        .match_corpus("salt", &diluted_salt_corpus())
        .expect("match");
    assert_eq!(ids(&hits), vec![1]);
    assert_eq!(hits[0].score, 0.0);
    assert!(hits[0].similarity > 0.0 && hits[0].similarity < 5e-5);
}

#[test]
fn ranking_drops_sub_hundredth_similarities() {
    let ranked = rank_similarities(&[0.00004, 0.5, 0.0, 0.0001], &MatchConfig::default());
    assert_eq!(ranked, vec![(1, 0.5), (3, 0.0001)]);
}

#[test]
fn fullwidth_query_matches_plain_text_by_default() {
    let corpus = vec![doc(1, "rice beans"), doc(2, "pasta")];
    let hits = match_documents("\u{FF52}\u{FF49}\u{FF43}\u{FF45}", &corpus, 5).expect("match");
    assert_eq!(ids(&hits), vec![1]);

    let lowercase_only = Matcher::new(
        AnalyzerConfig {
            normalize_unicode: false,
            ..AnalyzerConfig::default()
        },
        MatchConfig::default(),
    );
    let hits = lowercase_only
        .match_corpus("\u{FF52}\u{FF49}\u{FF43}\u{FF45}", &corpus)
        .expect("match");
    assert!(hits.is_empty());
}

#[test]
fn string_identifiers_are_opaque() {
    let corpus = vec![
        Document::new("pad-thai".to_string(), "rice noodles, peanuts, lime"),
        Document::new("risotto".to_string(), "arborio rice, parmesan"),
    ];
    let hits = match_documents("peanuts lime", &corpus, 5).expect("match");
    assert_eq!(ids(&hits), vec!["pad-thai".to_string()]);
}

#[test]
fn corpus_is_not_mutated() {
    let corpus = kitchen_corpus();
    let before = corpus.clone();
    let _ = match_documents("garlic", &corpus, 3).expect("match");
    assert_eq!(corpus, before);
}

#[test]
fn concurrent_matches_agree() {
    let corpus = Arc::new(kitchen_corpus());
    let matcher = Arc::new(Matcher::default());
    let expected = matcher
        .match_corpus("tomato garlic", &corpus)
        .expect("baseline");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let corpus = Arc::clone(&corpus);
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || matcher.match_corpus("tomato garlic", &corpus))
        })
        .collect();

    for handle in handles {
        let hits = handle.join().expect("thread").expect("match");
        assert_eq!(hits, expected);
    }
}

struct CountingMetrics {
    scans: AtomicUsize,
}

impl MatchMetrics for CountingMetrics {
    fn record_match(
        &self,
        source: MatchSource,
        corpus_size: usize,
        _latency: Duration,
        hit_count: usize,
    ) {
        if source == MatchSource::Scan {
            assert!(hit_count <= corpus_size);
            self.scans.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn metrics_recorder_sees_scans() {
    let recorder = Arc::new(CountingMetrics {
        scans: AtomicUsize::new(0),
    });
    set_match_metrics(Some(recorder.clone()));

    let _ = match_documents("rice", &kitchen_corpus(), 5).expect("match");
    assert!(recorder.scans.load(Ordering::SeqCst) >= 1);

    set_match_metrics(None);
}
