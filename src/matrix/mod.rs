// Raw input loading — numeric matrices and the vocabulary index.

pub mod loader;
pub mod vocab;

pub use loader::{load_matrix, parse_matrix, RawMatrix};
pub use vocab::VocabularyIndex;
