// Error types for loading and aggregating dynamic topic model output.
//
// Every fatal variant carries enough context (source, declared width,
// actual counts) to diagnose a mismatch between the data files and the
// model configuration without re-running anything.

use std::path::PathBuf;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DtmError>;

/// Errors raised while loading, aggregating or querying model output.
#[derive(Debug, thiserror::Error)]
pub enum DtmError {
    /// A numeric file contains a non-float token or its value count is not
    /// a multiple of the declared row width.
    #[error("Malformed input in {source_name}: {reason} (row width {width})")]
    MalformedInput {
        /// File path, or `<memory>` for in-memory sources
        source_name: String,
        /// Declared row width
        width: usize,
        /// What exactly was wrong
        reason: String,
    },

    /// A document or bucket total was exactly zero during normalization.
    #[error("Division by zero: {scope} {index} has zero total mass")]
    DivisionByZero {
        /// "document" or "time slice"
        scope: &'static str,
        index: usize,
    },

    /// Declared time-slice buckets do not partition the documents exactly.
    #[error("Time-slice buckets cover {declared} documents but the matrix has {documents}")]
    BucketCoverage { declared: usize, documents: usize },

    /// A requested word has no entry in a topic's vocabulary.
    ///
    /// Only produced when a caller explicitly asks for a hard failure;
    /// per-word queries normally return `None` instead.
    #[error("Word '{word}' not found in topic {topic}")]
    WordNotFound { word: String, topic: usize },

    /// The model configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output structure could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DtmError {
    /// Shorthand for wrapping an I/O failure with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the soft "word absent" condition rather than a data fault.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::WordNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_includes_context() {
        let err = DtmError::MalformedInput {
            source_name: "gam.dat".to_string(),
            width: 11,
            reason: "23 values is not a multiple of the row width".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gam.dat"));
        assert!(msg.contains("11"));
        assert!(msg.contains("23 values"));
    }

    #[test]
    fn test_only_word_not_found_is_soft() {
        let soft = DtmError::WordNotFound {
            word: "computer".to_string(),
            topic: 3,
        };
        assert!(soft.is_soft());
        assert!(!DtmError::BucketCoverage {
            declared: 4,
            documents: 5
        }
        .is_soft());
    }

    #[test]
    fn test_json_errors_are_not_reported_as_io() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: DtmError = json_err.into();
        assert!(matches!(err, DtmError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
