// Vocabulary index: word position to token text.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{DtmError, Result};

/// Ordered vocabulary, 0-indexed by line order in the vocabulary file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VocabularyIndex {
    tokens: Vec<String>,
}

impl VocabularyIndex {
    /// Build from newline-delimited text. Each line is trimmed; blank lines
    /// still occupy a position so later words keep their index.
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: text.lines().map(|line| line.trim().to_string()).collect(),
        }
    }

    /// Build from raw file bytes. Lines that are not valid UTF-8 are decoded
    /// lossily (with a warning) so one bad token can't shift every later
    /// position or sink the whole vocabulary.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }
        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        let tokens = body
            .split(|&b| b == b'\n')
            .enumerate()
            .map(|(position, line)| {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                let text = String::from_utf8_lossy(line);
                if let Cow::Owned(_) = text {
                    warn!(position, token = %text, "Vocabulary line is not valid UTF-8, decoded lossily");
                }
                text.trim().to_string()
            })
            .collect();
        Self { tokens }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| DtmError::io(path, e))?;
        let vocab = Self::from_bytes(&bytes);
        debug!(path = %path.display(), words = vocab.len(), "Loaded vocabulary");
        Ok(vocab)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `position`, if the vocabulary file enumerates it.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.tokens.get(position).map(String::as_str)
    }

    /// The token at `position`, or `word_<position>` past the end.
    ///
    /// Word matrices can list more rows than the vocabulary has lines when
    /// preprocessing and model training drifted apart.
    pub fn word(&self, position: usize) -> String {
        match self.get(position) {
            Some(token) => token.to_string(),
            None => placeholder(position),
        }
    }
}

/// Synthetic name for a word position the vocabulary doesn't cover.
pub fn placeholder(position: usize) -> String {
    format!("word_{position}")
}
