//! Error types for docingest.
//!
//! Every loader, the dispatcher and the config layer return [`Result`].
//! Missing inputs are reported at loader construction, not at load time.

use std::path::PathBuf;

/// Boxed backend error, used where an external library's failure is wrapped.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all ingestion operations.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input path does not exist.
    #[error("File not found at {}", .0.display())]
    NotFound(PathBuf),

    /// The PDF loader was given a path without a `.pdf` extension.
    #[error("Not a PDF file: {}", .0.display())]
    NotPdf(PathBuf),

    /// The PDF backend could not open the document (corrupt or unsupported).
    #[error("Error opening file: {}", path.display())]
    PdfOpen {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// No loader handles this file extension.
    #[error("Unsupported file type: {}", .0.display())]
    Unsupported(PathBuf),

    /// The grammar could not be installed or the parser produced no tree.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid settings file, environment override, or settings value.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IngestError>;
