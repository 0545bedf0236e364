// Per-document topic proportions.
//
// Each row of the document x topic matrix is divided by its own sum, so a
// document's proportions add up to 100 (within 2-decimal rounding).

use crate::error::{DtmError, Result};
use crate::matrix::RawMatrix;

use super::{percent, round_to};

/// Normalized topic percentages for every document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProportions {
    topic_count: usize,
    by_document: Vec<Vec<f64>>,
}

impl DocumentProportions {
    /// Normalize every document row to percentages.
    ///
    /// A row summing to exactly zero is corrupt input and fails with
    /// `DivisionByZero` instead of producing NaN.
    pub fn compute(matrix: &RawMatrix) -> Result<Self> {
        let by_document = matrix
            .rows()
            .iter()
            .enumerate()
            .map(|(document, row)| {
                let sum: f64 = row.iter().sum();
                if sum == 0.0 {
                    return Err(DtmError::DivisionByZero {
                        scope: "document",
                        index: document,
                    });
                }
                Ok(row
                    .iter()
                    .map(|&value| percent(value, sum))
                    .collect::<Vec<f64>>())
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;

        Ok(Self {
            topic_count: matrix.width(),
            by_document,
        })
    }

    pub fn topic_count(&self) -> usize {
        self.topic_count
    }

    pub fn document_count(&self) -> usize {
        self.by_document.len()
    }

    /// Proportions for one document, in topic order.
    pub fn document(&self, document: usize) -> Option<&[f64]> {
        self.by_document.get(document).map(Vec::as_slice)
    }

    pub fn by_document(&self) -> &[Vec<f64>] {
        &self.by_document
    }

    /// One topic's proportion in every document, in document order.
    pub fn by_topic(&self, topic: usize) -> Option<Vec<f64>> {
        if topic >= self.topic_count {
            return None;
        }
        Some(self.by_document.iter().map(|row| row[topic]).collect())
    }

    /// Topics ordered by mean document proportion, heaviest first.
    ///
    /// Ties keep topic index order. Means are rounded to 2 decimals.
    pub fn topic_ranking(&self) -> Vec<(usize, f64)> {
        let documents = self.by_document.len().max(1) as f64;
        let mut ranking: Vec<(usize, f64)> = (0..self.topic_count)
            .map(|topic| {
                let total: f64 = self.by_document.iter().map(|row| row[topic]).sum();
                (topic, round_to(total / documents, 2))
            })
            .collect();
        ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranking
    }
}
