// dtm-lens: topic proportions and word likelihood trajectories from the
// output of a dynamic topic model.
//
// This is the library root. Each module corresponds to a stage of the
// load -> aggregate -> query pipeline.

pub mod config;
pub mod error;
pub mod matrix;
pub mod output;
pub mod pipeline;
pub mod proportions;
pub mod words;

pub use error::{DtmError, Result};
