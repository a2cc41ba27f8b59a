//! Ingestion loaders and the extension dispatcher.
//!
//! Each loader validates its path at construction and does one synchronous
//! read-and-extract pass per `load()` call. Loaders share no state, so
//! [`load_dir`] can run one per file on the rayon pool.

pub mod code;
pub mod markdown;
pub mod parser;
pub mod pdf;
pub mod source;

pub use code::CodeLoader;
pub use markdown::MarkdownLoader;
pub use parser::CodeParser;
pub use pdf::{LopdfBackend, PdfBackend, PdfDocument, PdfLoader};
pub use source::SourceFile;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::chunk::Chunk;
use crate::error::{IngestError, Result};
use crate::types::{Element, MarkdownSection, PageRecord, SourceType};

/// Records loaded from one file, tagged by the kind of loader that made them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source_type", content = "records", rename_all = "lowercase")]
pub enum Document {
    Code(Vec<Element>),
    Markdown(Vec<MarkdownSection>),
    Pdf(Vec<PageRecord>),
}

impl Document {
    pub fn source_type(&self) -> SourceType {
        match self {
            Self::Code(_) => SourceType::Code,
            Self::Markdown(_) => SourceType::Markdown,
            Self::Pdf(_) => SourceType::Pdf,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Code(v) => v.len(),
            Self::Markdown(v) => v.len(),
            Self::Pdf(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One chunk per record, indexed from 0 in record order.
    pub fn into_chunks(self) -> Vec<Chunk> {
        match self {
            Self::Code(elements) => elements
                .iter()
                .enumerate()
                .map(|(i, e)| Chunk::from_element(e, i))
                .collect(),
            Self::Markdown(sections) => sections
                .iter()
                .enumerate()
                .map(|(i, s)| Chunk::from_section(s, i))
                .collect(),
            Self::Pdf(pages) => pages
                .iter()
                .enumerate()
                .map(|(i, p)| Chunk::from_page(p, i))
                .collect(),
        }
    }
}

/// Load one file with the loader matching its extension.
pub fn load_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let source_type = SourceType::from_path(path);
    tracing::debug!(path = %path.display(), ?source_type, "loading");

    match source_type {
        Some(SourceType::Code) => Ok(Document::Code(CodeLoader::new(path)?.load()?)),
        Some(SourceType::Markdown) => Ok(Document::Markdown(MarkdownLoader::new(path)?.load()?)),
        Some(SourceType::Pdf) => Ok(Document::Pdf(PdfLoader::new(path)?.load()?)),
        None => {
            if !path.exists() {
                return Err(IngestError::NotFound(path.to_path_buf()));
            }
            Err(IngestError::Unsupported(path.to_path_buf()))
        }
    }
}

/// Supported files under `dir`, sorted by path.
pub fn discover_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(IngestError::NotFound(dir.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| SourceType::from_path(p).is_some())
        .collect();
    files.sort();
    Ok(files)
}

/// Load every supported file under `dir` in parallel.
///
/// A failing file does not stop the batch; its error is returned in place.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, Result<Document>)>> {
    let files = discover_files(dir)?;
    let results: Vec<(PathBuf, Result<Document>)> = files
        .into_par_iter()
        .map(|path| {
            let result = load_file(&path);
            (path, result)
        })
        .collect();

    // Reported from the calling thread, once per failed file.
    for (path, result) in &results {
        if let Err(e) = result {
            tracing::warn!("Failed to load {}: {e}", path.display());
        }
    }
    Ok(results)
}
