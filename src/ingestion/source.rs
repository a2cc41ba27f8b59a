//! Source reader: existence checks and UTF-8 reads for a single input file.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// A validated input path.
///
/// Construction fails with [`IngestError::NotFound`] when the path does not
/// exist, so a bad path surfaces before any parsing is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    absolute: String,
}

impl SourceFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(IngestError::NotFound(path));
        }
        let absolute = match path.canonicalize() {
            Ok(p) => p,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(IngestError::NotFound(path))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            absolute: absolute.display().to_string(),
        })
    }

    /// The path as given by the caller.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path string stamped into every record as `source`.
    pub fn source(&self) -> &str {
        &self.absolute
    }

    /// Final path component, used in log lines.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Read the whole file as UTF-8 text.
    pub fn read_text(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}
