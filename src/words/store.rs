// Topic-word likelihood store.
//
// The model writes one file per topic: a row per vocabulary word, a column
// per time slice, each cell a log-probability. Row order matches the
// vocabulary file, so the word for row N is vocabulary position N.

use std::collections::HashMap;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::error::{DtmError, Result};
use crate::matrix::{load_matrix, RawMatrix, VocabularyIndex};

/// One topic's words, each with a log-probability per time slice.
#[derive(Debug, Clone, Default)]
pub struct TopicWords {
    /// (word, series) in vocabulary order
    entries: Vec<(String, Vec<f64>)>,
    index: HashMap<String, usize>,
}

impl TopicWords {
    /// Attach vocabulary words to the rows of a topic's log-probability matrix.
    ///
    /// If the vocabulary lists the same token twice, the first row wins.
    pub fn from_matrix(matrix: RawMatrix, vocab: &VocabularyIndex) -> Self {
        let mut entries = Vec::with_capacity(matrix.row_count());
        let mut index = HashMap::with_capacity(matrix.row_count());

        for (position, series) in matrix.into_rows().into_iter().enumerate() {
            let word = vocab.word(position);
            if index.contains_key(&word) {
                warn!(word = %word, position, "Duplicate vocabulary token, keeping first row");
                continue;
            }
            index.insert(word.clone(), entries.len());
            entries.push((word, series));
        }

        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The log-probability series for `word`, one value per time slice.
    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.index
            .get(word)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Words ranked by their peak log-probability over all time slices,
    /// skipping the first `offset` ranks and returning up to `count`.
    ///
    /// Ties keep vocabulary order.
    pub fn top_overall(&self, offset: usize, count: usize) -> Vec<&str> {
        let peaks: Vec<f64> = self
            .entries
            .iter()
            .map(|(_, series)| series.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect();
        self.ranked_by(&peaks, offset, count)
    }

    /// Words ranked by probability (not log-probability) in one time slice.
    ///
    /// Returns `None` when `slice` is past the end of the series.
    pub fn top_in_slice(&self, slice: usize, offset: usize, count: usize) -> Option<Vec<&str>> {
        let probabilities: Vec<f64> = self
            .entries
            .iter()
            .map(|(_, series)| series.get(slice).map(|lp| lp.exp()))
            .collect::<Option<Vec<f64>>>()?;
        Some(self.ranked_by(&probabilities, offset, count))
    }

    fn ranked_by(&self, scores: &[f64], offset: usize, count: usize) -> Vec<&str> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        // sort_by is stable, so equal scores stay in vocabulary order
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
            .into_iter()
            .skip(offset)
            .take(count)
            .map(|i| self.entries[i].0.as_str())
            .collect()
    }
}

/// Word series for every topic, all with the same number of time slices.
#[derive(Debug, Clone)]
pub struct TopicWordStore {
    time_slice_count: usize,
    topics: Vec<TopicWords>,
}

impl TopicWordStore {
    /// Build from one already-loaded matrix per topic, in topic order.
    pub fn from_matrices(
        matrices: Vec<RawMatrix>,
        vocab: &VocabularyIndex,
        time_slice_count: usize,
    ) -> Result<Self> {
        let mut topics = Vec::with_capacity(matrices.len());
        for (topic, matrix) in matrices.into_iter().enumerate() {
            if matrix.width() != time_slice_count {
                return Err(DtmError::MalformedInput {
                    source_name: format!("topic {topic}"),
                    width: time_slice_count,
                    reason: format!("matrix has row width {}", matrix.width()),
                });
            }
            if matrix.row_count() > vocab.len() {
                warn!(
                    topic,
                    rows = matrix.row_count(),
                    vocabulary = vocab.len(),
                    "Word matrix has more rows than the vocabulary, using placeholders"
                );
            }
            topics.push(TopicWords::from_matrix(matrix, vocab));
        }
        Ok(Self {
            time_slice_count,
            topics,
        })
    }

    /// Load one log-probability file per topic, in topic order.
    pub fn load(
        paths: &[PathBuf],
        vocab: &VocabularyIndex,
        time_slice_count: usize,
    ) -> Result<Self> {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Topics [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );

        let mut matrices = Vec::with_capacity(paths.len());
        for path in paths {
            match load_matrix(path, time_slice_count) {
                Ok(matrix) => matrices.push(matrix),
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let store = Self::from_matrices(matrices, vocab, time_slice_count)?;
        info!(
            topics = store.topic_count(),
            time_slices = time_slice_count,
            "Loaded topic-word likelihoods"
        );
        Ok(store)
    }

    pub fn time_slice_count(&self) -> usize {
        self.time_slice_count
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn topic(&self, topic: usize) -> Option<&TopicWords> {
        self.topics.get(topic)
    }

    pub fn topics(&self) -> impl Iterator<Item = (usize, &TopicWords)> {
        self.topics.iter().enumerate()
    }

    pub fn word_count(&self, topic: usize) -> Option<usize> {
        self.topic(topic).map(TopicWords::len)
    }

    /// Log-probability series of `word` in `topic`.
    pub fn series(&self, topic: usize, word: &str) -> Option<&[f64]> {
        self.topic(topic)?.get(word)
    }

    /// Top words of every topic by peak log-probability.
    pub fn top_words(&self, offset: usize, count: usize) -> Vec<Vec<&str>> {
        self.topics
            .iter()
            .map(|words| words.top_overall(offset, count))
            .collect()
    }

    /// Top words of one topic in one time slice, by probability.
    pub fn top_words_in_slice(
        &self,
        topic: usize,
        slice: usize,
        offset: usize,
        count: usize,
    ) -> Option<Vec<&str>> {
        self.topic(topic)?.top_in_slice(slice, offset, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::parse_matrix;

    fn topic(text: &str, vocab: &str) -> TopicWords {
        TopicWords::from_matrix(
            parse_matrix(text, 2).unwrap(),
            &VocabularyIndex::parse(vocab),
        )
    }

    #[test]
    fn test_rows_get_vocabulary_words() {
        let words = topic("-1 -2\n-3 -4\n-5 -6\n", "alpha\nbeta\n");
        assert_eq!(words.get("alpha").unwrap(), &[-1.0, -2.0]);
        assert_eq!(words.get("beta").unwrap(), &[-3.0, -4.0]);
        assert_eq!(words.get("word_2").unwrap(), &[-5.0, -6.0]);
        assert!(words.get("gamma").is_none());
    }

    #[test]
    fn test_duplicate_token_keeps_first() {
        let words = topic("-1 -1\n-9 -9\n", "same\nsame\n");
        assert_eq!(words.len(), 1);
        assert_eq!(words.get("same").unwrap(), &[-1.0, -1.0]);
    }

    #[test]
    fn test_top_overall_uses_peak_with_stable_ties() {
        let words = topic("-5 -1\n-2 -2\n-1 -6\n-3 -3\n", "a\nb\nc\nd\n");
        // peaks: a=-1, b=-2, c=-1, d=-3
        assert_eq!(words.top_overall(0, 3), vec!["a", "c", "b"]);
        assert_eq!(words.top_overall(2, 5), vec!["b", "d"]);
    }

    #[test]
    fn test_top_in_slice() {
        let words = topic("-5 -1\n-2 -2\n-1 -6\n", "a\nb\nc\n");
        assert_eq!(words.top_in_slice(0, 0, 2).unwrap(), vec!["c", "b"]);
        assert_eq!(words.top_in_slice(1, 1, 2).unwrap(), vec!["b", "c"]);
        assert!(words.top_in_slice(2, 0, 2).is_none());
    }

    #[test]
    fn test_store_rejects_wrong_width() {
        let vocab = VocabularyIndex::parse("a\n");
        let matrices = vec![parse_matrix("-1 -2 -3", 3).unwrap()];
        assert!(TopicWordStore::from_matrices(matrices, &vocab, 2).is_err());
    }
}
