// Word likelihoods — per-topic word series, rankings and plural merging.

pub mod inflect;
pub mod series;
pub mod store;
pub mod traits;

pub use inflect::EnglishPluralizer;
pub use series::{WordSeries, WordSeriesResolver};
pub use store::{TopicWordStore, TopicWords};
pub use traits::{NoPlurals, Pluralizer};
