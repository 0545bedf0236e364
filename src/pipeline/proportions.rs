// Topic proportion pipeline: gam.dat -> per-document and per-slice shares.
//
// 1. Load the document x topic weights (row width = topic count)
// 2. Normalize each document to percentages
// 3. Sum weights per time-slice bucket and normalize per bucket

use tracing::info;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::matrix::{load_matrix, RawMatrix};
use crate::proportions::{DocumentProportions, TimeSliceProportions};

/// Both proportion views of one model.
#[derive(Debug, Clone)]
pub struct TopicProportions {
    pub documents: DocumentProportions,
    pub time_slices: TimeSliceProportions,
}

impl TopicProportions {
    /// Aggregate an already-loaded document x topic matrix.
    pub fn compute(matrix: &RawMatrix, model: &ModelConfig) -> Result<Self> {
        let documents = DocumentProportions::compute(matrix)?;
        let time_slices = TimeSliceProportions::compute(matrix, &model.time_slices)?;
        Ok(Self {
            documents,
            time_slices,
        })
    }
}

/// Load the model's gamma file and compute its topic proportions.
pub fn run(model: &ModelConfig) -> Result<TopicProportions> {
    let path = model.gamma_path();
    let matrix = load_matrix(&path, model.topic_count)?;

    info!(
        path = %path.display(),
        documents = matrix.row_count(),
        topics = matrix.width(),
        "Loaded document-topic weights"
    );

    TopicProportions::compute(&matrix, model)
}
