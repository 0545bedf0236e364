// Unit tests for the topic-word store and word series resolution.
//
// Exercises ranking (peak log-probability overall, probability per slice),
// plural merging through an injected pluralizer, and the explicit
// "not found" result for absent words.

use dtm_lens::matrix::{parse_matrix, VocabularyIndex};
use dtm_lens::words::series::{exp_series, merge_series};
use dtm_lens::words::{EnglishPluralizer, NoPlurals, TopicWordStore, WordSeriesResolver};
use dtm_lens::DtmError;

fn add_s(word: &str) -> String {
    format!("{word}s")
}

fn two_topic_store() -> TopicWordStore {
    let vocab = VocabularyIndex::parse("computer\ncomputers\nsecurity\nfile\n");
    let matrices = vec![
        parse_matrix("-1.0 -2.0\n-1.5 -2.5\n-4.0 -0.5\n-3.0 -3.0\n", 2).unwrap(),
        parse_matrix("-2.0 -2.0\n-9.0 -9.0\n-0.1 -0.2\n", 2).unwrap(),
    ];
    TopicWordStore::from_matrices(matrices, &vocab, 2).unwrap()
}

// ============================================================
// Store shape and rankings
// ============================================================

#[test]
fn store_counts() {
    let store = two_topic_store();
    assert_eq!(store.topic_count(), 2);
    assert_eq!(store.time_slice_count(), 2);
    assert_eq!(store.word_count(0), Some(4));
    assert_eq!(store.word_count(1), Some(3));
    assert_eq!(store.word_count(2), None);
}

#[test]
fn top_words_by_peak_log_probability() {
    let store = two_topic_store();
    let top = store.top_words(0, 2);
    // topic 0 peaks: computer -1.0, computers -1.5, security -0.5, file -3.0
    assert_eq!(top[0], vec!["security", "computer"]);
    assert_eq!(top[1], vec!["security", "computer"]);
}

#[test]
fn top_words_with_offset() {
    let store = two_topic_store();
    let top = store.top_words(2, 10);
    assert_eq!(top[0], vec!["computers", "file"]);
    assert_eq!(top[1], vec!["computers"]);
}

#[test]
fn top_words_in_slice_by_probability() {
    let store = two_topic_store();
    assert_eq!(
        store.top_words_in_slice(0, 0, 0, 4).unwrap(),
        vec!["computer", "computers", "file", "security"]
    );
    assert_eq!(
        store.top_words_in_slice(0, 1, 0, 1).unwrap(),
        vec!["security"]
    );
    assert!(store.top_words_in_slice(0, 5, 0, 1).is_none());
    assert!(store.top_words_in_slice(7, 0, 0, 1).is_none());
}

// ============================================================
// Word series resolution
// ============================================================

#[test]
fn singular_and_plural_are_merged() {
    let store = two_topic_store();
    let resolver = WordSeriesResolver::new(&store, &add_s);
    let series = resolver.resolve("computer", 0).unwrap();

    let expected = [
        (-1.0f64).exp() + (-1.5f64).exp(),
        (-2.0f64).exp() + (-2.5f64).exp(),
    ];
    assert_eq!(series.values.len(), 2);
    for (got, want) in series.values.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{got} vs {want}");
    }
}

#[test]
fn merge_matches_independent_sums() {
    let singular = [-1.0, -2.0, -0.3];
    let plural = [-1.5, -2.5, -7.0];
    let merged = merge_series(&exp_series(&singular), &exp_series(&plural));
    let reversed = merge_series(&exp_series(&plural), &exp_series(&singular));
    for i in 0..3 {
        let direct = singular[i].exp() + plural[i].exp();
        assert!((merged[i] - direct).abs() < 1e-12);
        assert!((merged[i] - reversed[i]).abs() < 1e-15);
    }
}

#[test]
fn english_pluralizer_plugs_in() {
    let store = two_topic_store();
    let resolver = WordSeriesResolver::new(&store, &EnglishPluralizer);
    let series = resolver.resolve("computer", 0).unwrap();
    assert_eq!(series.merged_plural.as_deref(), Some("computers"));
}

#[test]
fn no_plurals_keeps_singular_only() {
    let store = two_topic_store();
    let resolver = WordSeriesResolver::new(&store, &NoPlurals);
    let series = resolver.resolve("computer", 0).unwrap();
    assert_eq!(series.values, vec![(-1.0f64).exp(), (-2.0f64).exp()]);
    assert!(series.merged_plural.is_none());
}

#[test]
fn absent_word_is_explicitly_not_found() {
    let store = two_topic_store();
    let resolver = WordSeriesResolver::new(&store, &add_s);
    assert!(resolver.resolve("file", 1).is_none());
    assert!(resolver.resolve("terminal", 0).is_none());
}

#[test]
fn single_topic_lookup_fails_with_word_not_found() {
    let store = two_topic_store();
    let resolver = WordSeriesResolver::new(&store, &EnglishPluralizer);
    let series = resolver.require("security", 1).unwrap();
    assert_eq!(series.topic, 1);
    let err = resolver.require("file", 1).unwrap_err();
    assert!(matches!(
        err,
        DtmError::WordNotFound { ref word, topic: 1 } if word == "file"
    ));
    assert!(err.is_soft());
}

#[test]
fn english_pluralizer_merges_regular_plural_of_software() {
    let vocab = VocabularyIndex::parse("software\nsoftwares\n");
    let store = TopicWordStore::from_matrices(
        vec![parse_matrix("-1.0 -2.0\n-2.0 -1.0\n", 2).unwrap()],
        &vocab,
        2,
    )
    .unwrap();
    let resolver = WordSeriesResolver::new(&store, &EnglishPluralizer);
    let series = resolver.resolve("software", 0).unwrap();
    assert_eq!(series.merged_plural.as_deref(), Some("softwares"));
    let expected = (-1.0f64).exp() + (-2.0f64).exp();
    assert!((series.values[0] - expected).abs() < 1e-12);
    assert!((series.values[1] - expected).abs() < 1e-12);
}

#[test]
fn across_topics_reports_each_topic() {
    let store = two_topic_store();
    let resolver = WordSeriesResolver::new(&store, &add_s);
    let per_topic = resolver.resolve_across_topics("file");
    assert_eq!(per_topic.len(), 2);
    assert!(per_topic[0].1.is_some());
    assert!(per_topic[1].1.is_none());
}

#[test]
fn very_negative_log_probability_is_a_real_zero_not_absent() {
    let vocab = VocabularyIndex::parse("rare\n");
    let store =
        TopicWordStore::from_matrices(vec![parse_matrix("-1000 -1000", 2).unwrap()], &vocab, 2)
            .unwrap();
    let resolver = WordSeriesResolver::new(&store, &NoPlurals);
    let series = resolver.resolve("rare", 0).unwrap();
    assert_eq!(series.values, vec![0.0, 0.0]);
}
