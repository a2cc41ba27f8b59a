//! Configuration data structures for docingest.
//!
//! Defines the YAML settings format: data directories and the chunking knobs
//! consumed by downstream chunkers. The loaders themselves never read these.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{IngestError, Result};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Root settings for docingest.
///
/// Loaded from defaults, an optional YAML file and `DOCINGEST_*` environment
/// variables (see [`crate::config::load_settings`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base directory that relative data directories hang off.
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Where raw documents are read from by `docingest ingest`.
    #[serde(default)]
    pub data_raw_dir: Option<PathBuf>,

    /// Where loaded records are written by `docingest ingest`.
    #[serde(default)]
    pub data_processed_dir: Option<PathBuf>,

    /// Target chunk size in tokens.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in tokens.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Token count above which a code chunk is split further.
    #[serde(default = "default_max_code_chunk_size")]
    pub max_code_chunk_size: usize,

    /// Tokenizer used for token counting.
    #[serde(default = "default_tokenizer_model")]
    pub tokenizer_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            data_raw_dir: None,
            data_processed_dir: None,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            max_code_chunk_size: default_max_code_chunk_size(),
            tokenizer_model: default_tokenizer_model(),
        }
    }
}

impl Settings {
    /// Effective raw data directory (`<project_root>/data/raw` unless set).
    pub fn raw_dir(&self) -> PathBuf {
        self.resolve(self.data_raw_dir.as_ref(), "raw")
    }

    /// Effective processed data directory (`<project_root>/data/processed` unless set).
    pub fn processed_dir(&self) -> PathBuf {
        self.resolve(self.data_processed_dir.as_ref(), "processed")
    }

    fn resolve(&self, configured: Option<&PathBuf>, leaf: &str) -> PathBuf {
        match configured {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => self.project_root.join(p),
            None => self.project_root.join("data").join(leaf),
        }
    }

    /// Reject settings a chunker could not work with.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(IngestError::Config("chunk_size must be positive".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(IngestError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.max_code_chunk_size == 0 {
            return Err(IngestError::Config(
                "max_code_chunk_size must be positive".into(),
            ));
        }
        if self.tokenizer_model.trim().is_empty() {
            return Err(IngestError::Config("tokenizer_model must not be empty".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_chunk_size() -> usize {
    512
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_max_code_chunk_size() -> usize {
    1000
}

fn default_tokenizer_model() -> String {
    "cl100k_base".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
