use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DtmError, Result};
use crate::proportions::TimeSliceBuckets;

const DEFAULT_MODEL_CONFIG: &str = "./dtm.json";
const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Runtime configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so either works.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON model description (DTM_MODEL_CONFIG)
    pub model_config_path: PathBuf,
    /// Where chart specs and reports are written (DTM_OUTPUT_DIR)
    pub output_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            model_config_path: env::var("DTM_MODEL_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_CONFIG)),
            output_dir: env::var("DTM_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }

    /// Read and validate the model description this config points at.
    pub fn model(&self) -> Result<ModelConfig> {
        if !self.model_config_path.exists() {
            return Err(DtmError::InvalidConfig(format!(
                "model config {} not found.\n\
                 Copy dtm.example.json to dtm.json or set DTM_MODEL_CONFIG.",
                self.model_config_path.display()
            )));
        }
        ModelConfig::load(&self.model_config_path)
    }
}

/// Description of one trained dynamic topic model and how to display it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding the model's output files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Vocabulary file, one token per line
    #[serde(default = "default_vocab_path")]
    pub vocab_path: PathBuf,
    /// Document x topic weights, relative to `data_dir`
    #[serde(default = "default_gamma_file")]
    pub gamma_file: PathBuf,
    /// Per-topic log-probability file name, relative to `data_dir`.
    /// `{topic:03}` is replaced by the zero-padded topic index, `{topic}` by
    /// the plain index.
    #[serde(default = "default_topic_file_pattern")]
    pub topic_file_pattern: String,
    pub topic_count: usize,
    /// Document count of each time slice, in chronological order
    pub time_slices: TimeSliceBuckets,
    #[serde(default)]
    pub topic_labels: BTreeMap<usize, String>,
    /// Axis labels for some time slices; the rest get no tick label
    #[serde(default)]
    pub time_slice_labels: BTreeMap<usize, String>,
    #[serde(default)]
    pub palette: Vec<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("dtm")
}

fn default_vocab_path() -> PathBuf {
    PathBuf::from("ocr-text.vocab")
}

fn default_gamma_file() -> PathBuf {
    PathBuf::from("lda-seq/gam.dat")
}

fn default_topic_file_pattern() -> String {
    "lda-seqtopic-{topic:03}-var-e-log-prob.dat".to_string()
}

impl ModelConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DtmError::InvalidConfig(format!("model config is not valid: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| DtmError::io(path, e))?;
        let config = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            topics = config.topic_count,
            time_slices = config.time_slices.len(),
            "Loaded model config"
        );
        Ok(config)
    }

    /// Check the description is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.topic_count == 0 {
            return Err(DtmError::InvalidConfig(
                "topic_count must be at least 1".to_string(),
            ));
        }
        if self.time_slices.is_empty() {
            return Err(DtmError::InvalidConfig(
                "time_slices must list at least one bucket".to_string(),
            ));
        }
        if self.time_slices.document_count().is_none() {
            return Err(DtmError::InvalidConfig(
                "time_slices sizes add up to more documents than can be counted".to_string(),
            ));
        }
        if self.topic_count > 1 && !self.topic_file_pattern.contains("{topic") {
            return Err(DtmError::InvalidConfig(format!(
                "topic_file_pattern '{}' has no {{topic}} placeholder",
                self.topic_file_pattern
            )));
        }
        if let Some(topic) = self.topic_labels.keys().find(|&&t| t >= self.topic_count) {
            return Err(DtmError::InvalidConfig(format!(
                "topic label for topic {topic}, but topic_count is {}",
                self.topic_count
            )));
        }
        if let Some(slice) = self
            .time_slice_labels
            .keys()
            .find(|&&s| s >= self.time_slices.len())
        {
            return Err(DtmError::InvalidConfig(format!(
                "time slice label for slice {slice}, but there are {} time slices",
                self.time_slices.len()
            )));
        }
        Ok(())
    }

    pub fn time_slice_count(&self) -> usize {
        self.time_slices.len()
    }

    /// Display label for a topic, falling back to its index.
    pub fn topic_label(&self, topic: usize) -> String {
        self.topic_labels
            .get(&topic)
            .cloned()
            .unwrap_or_else(|| format!("TOPIC {topic}"))
    }

    pub fn gamma_path(&self) -> PathBuf {
        self.data_dir.join(&self.gamma_file)
    }

    pub fn topic_file(&self, topic: usize) -> PathBuf {
        let name = self
            .topic_file_pattern
            .replace("{topic:03}", &format!("{topic:03}"))
            .replace("{topic}", &topic.to_string());
        self.data_dir.join(name)
    }

    /// Log-probability file of every topic, in topic order.
    pub fn topic_files(&self) -> Vec<PathBuf> {
        (0..self.topic_count).map(|t| self.topic_file(t)).collect()
    }
}
