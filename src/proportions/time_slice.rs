// Per-time-slice topic proportions.
//
// Documents are ordered chronologically, so a time slice is a contiguous run
// of documents. For each slice we sum the raw topic weights of its documents
// and express each topic's mass as a percentage of the slice total.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DtmError, Result};
use crate::matrix::RawMatrix;

use super::percent;

/// Ordered document counts, one per time slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSliceBuckets {
    sizes: Vec<usize>,
}

impl TimeSliceBuckets {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self { sizes }
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Number of documents the buckets account for, or `None` if the sizes
    /// overflow `usize`.
    pub fn document_count(&self) -> Option<usize> {
        self.sizes
            .iter()
            .try_fold(0usize, |total, &size| total.checked_add(size))
    }

    /// Document index range of each bucket, from the running sum of sizes.
    ///
    /// Only meaningful once `document_count` is known not to overflow.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.sizes
            .iter()
            .map(|&size| {
                let range = start..start + size;
                start += size;
                range
            })
            .collect()
    }

    /// Fail unless the buckets cover exactly `documents` documents.
    pub fn check_coverage(&self, documents: usize) -> Result<()> {
        let declared = self.document_count().ok_or_else(|| {
            DtmError::InvalidConfig("time slice sizes overflow the document count".to_string())
        })?;
        if declared != documents {
            return Err(DtmError::BucketCoverage {
                declared,
                documents,
            });
        }
        Ok(())
    }
}

/// Topic percentages per time slice, plus the raw masses they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSliceProportions {
    topic_count: usize,
    /// Raw weight of all topics across each bucket's documents
    bucket_totals: Vec<f64>,
    /// [bucket][topic] raw weight
    topic_mass: Vec<Vec<f64>>,
    /// [topic][bucket] percentage of the bucket total
    by_topic: Vec<Vec<f64>>,
}

impl TimeSliceProportions {
    pub fn compute(matrix: &RawMatrix, buckets: &TimeSliceBuckets) -> Result<Self> {
        buckets.check_coverage(matrix.row_count())?;

        let topic_count = matrix.width();
        let mut bucket_totals = Vec::with_capacity(buckets.len());
        let mut topic_mass = Vec::with_capacity(buckets.len());

        for (slice, range) in buckets.ranges().into_iter().enumerate() {
            let mut total = 0.0f64;
            let mut mass = vec![0.0f64; topic_count];
            for row in &matrix.rows()[range.clone()] {
                total += row.iter().sum::<f64>();
                for (topic, value) in row.iter().enumerate() {
                    mass[topic] += value;
                }
            }

            if total == 0.0 {
                return Err(DtmError::DivisionByZero {
                    scope: "time slice",
                    index: slice,
                });
            }

            debug!(slice, documents = range.len(), total, "Aggregated time slice");
            bucket_totals.push(total);
            topic_mass.push(mass);
        }

        let by_topic: Vec<Vec<f64>> = (0..topic_count)
            .map(|topic| {
                topic_mass
                    .iter()
                    .zip(&bucket_totals)
                    .map(|(mass, &total)| percent(mass[topic], total))
                    .collect::<Vec<f64>>()
            })
            .collect();

        Ok(Self {
            topic_count,
            bucket_totals,
            topic_mass,
            by_topic,
        })
    }

    pub fn topic_count(&self) -> usize {
        self.topic_count
    }

    pub fn slice_count(&self) -> usize {
        self.bucket_totals.len()
    }

    /// One topic's percentage in every time slice.
    pub fn topic(&self, topic: usize) -> Option<&[f64]> {
        self.by_topic.get(topic).map(Vec::as_slice)
    }

    pub fn by_topic(&self) -> &[Vec<f64>] {
        &self.by_topic
    }

    /// All topic percentages within one time slice, in topic order.
    pub fn slice(&self, slice: usize) -> Option<Vec<f64>> {
        if slice >= self.slice_count() {
            return None;
        }
        Some(self.by_topic.iter().map(|series| series[slice]).collect())
    }

    pub fn bucket_total(&self, slice: usize) -> Option<f64> {
        self.bucket_totals.get(slice).copied()
    }

    pub fn topic_mass(&self, slice: usize, topic: usize) -> Option<f64> {
        self.topic_mass.get(slice)?.get(topic).copied()
    }
}
