// Word series resolution — log-probabilities to probabilities, with the
// plural form's mass folded in so "computer" and "computers" chart as one.

use serde::Serialize;

use crate::error::{DtmError, Result};
use crate::proportions::round_to;

use super::store::TopicWordStore;
use super::traits::Pluralizer;

/// Probability of a word in one topic, per time slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSeries {
    pub word: String,
    pub topic: usize,
    /// The plural form, when its series was merged in
    pub merged_plural: Option<String>,
    pub values: Vec<f64>,
}

impl WordSeries {
    /// Mean probability over time slices, from the sum rounded to 4 decimals.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        round_to(self.values.iter().sum(), 4) / self.values.len() as f64
    }

    /// Values rounded for display.
    pub fn rounded(&self, decimals: u32) -> Vec<f64> {
        self.values.iter().map(|&v| round_to(v, decimals)).collect()
    }
}

/// Exponentiate a log-probability series.
pub fn exp_series(log_probs: &[f64]) -> Vec<f64> {
    log_probs.iter().map(|lp| lp.exp()).collect()
}

/// Element-wise sum of two equally long series.
pub fn merge_series(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// Looks up word series in a store, merging plural forms.
pub struct WordSeriesResolver<'a> {
    store: &'a TopicWordStore,
    pluralizer: &'a dyn Pluralizer,
}

impl<'a> WordSeriesResolver<'a> {
    pub fn new(store: &'a TopicWordStore, pluralizer: &'a dyn Pluralizer) -> Self {
        Self { store, pluralizer }
    }

    /// The word's probability series in `topic`, or `None` if the topic
    /// doesn't know the word.
    ///
    /// When the plural is a distinct word in the same topic, its
    /// probabilities are added slice by slice.
    pub fn resolve(&self, word: &str, topic: usize) -> Option<WordSeries> {
        let log_probs = self.store.series(topic, word)?;
        let mut values = exp_series(log_probs);

        let plural = self.pluralizer.pluralize(word);
        let mut merged_plural = None;
        if plural != word {
            if let Some(plural_log_probs) = self.store.series(topic, &plural) {
                values = merge_series(&values, &exp_series(plural_log_probs));
                merged_plural = Some(plural);
            }
        }

        Some(WordSeries {
            word: word.to_string(),
            topic,
            merged_plural,
            values,
        })
    }

    /// Like `resolve`, but an absent word is a `WordNotFound` error.
    pub fn require(&self, word: &str, topic: usize) -> Result<WordSeries> {
        self.resolve(word, topic)
            .ok_or_else(|| DtmError::WordNotFound {
                word: word.to_string(),
                topic,
            })
    }

    /// Resolve the word in every topic, in topic order.
    pub fn resolve_across_topics(&self, word: &str) -> Vec<(usize, Option<WordSeries>)> {
        (0..self.store.topic_count())
            .map(|topic| (topic, self.resolve(word, topic)))
            .collect()
    }
}
