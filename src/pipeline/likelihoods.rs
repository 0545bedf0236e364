// Word likelihood pipeline: vocabulary + per-topic files -> word store.

use tracing::info;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::matrix::VocabularyIndex;
use crate::words::TopicWordStore;

/// Load the vocabulary and every topic's log-probability file.
pub fn load(model: &ModelConfig) -> Result<TopicWordStore> {
    let vocab = VocabularyIndex::load(&model.vocab_path)?;
    info!(words = vocab.len(), "Loaded vocabulary");

    TopicWordStore::load(&model.topic_files(), &vocab, model.time_slice_count())
}
