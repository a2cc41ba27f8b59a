//! PDF loader: one record per page that has visible text.
//!
//! Text extraction sits behind [`PdfBackend`] so the page-filtering rules
//! can be exercised without real documents. [`LopdfBackend`] is the default.

use std::path::Path;

use crate::error::{BoxError, IngestError, Result};
use crate::ingestion::source::SourceFile;
use crate::types::PageRecord;

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// Opens PDF documents.
pub trait PdfBackend {
    type Document: PdfDocument;

    fn open(&self, path: &Path) -> std::result::Result<Self::Document, BoxError>;
}

/// An opened document; pages are addressed by 0-based index.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    fn page_text(&self, index: usize) -> std::result::Result<String, BoxError>;
}

/// [`PdfBackend`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

pub struct LopdfDocument {
    doc: lopdf::Document,
    /// lopdf page numbers (1-based), in document order.
    pages: Vec<u32>,
}

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;

    fn open(&self, path: &Path) -> std::result::Result<LopdfDocument, BoxError> {
        let doc = lopdf::Document::load(path).map_err(BoxError::from)?;
        let pages = doc.get_pages().into_keys().collect();
        Ok(LopdfDocument { doc, pages })
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> std::result::Result<String, BoxError> {
        let page = self
            .pages
            .get(index)
            .ok_or_else(|| format!("page index {index} out of range"))?;
        self.doc
            .extract_text(&[*page])
            .map_err(BoxError::from)
    }
}

// ---------------------------------------------------------------------------
// PdfLoader
// ---------------------------------------------------------------------------

/// Loads one PDF file into [`PageRecord`]s.
pub struct PdfLoader<B: PdfBackend = LopdfBackend> {
    file: SourceFile,
    backend: B,
}

impl PdfLoader {
    /// Validate `path` and use the lopdf backend.
    ///
    /// Fails with [`IngestError::NotFound`] for a missing file and
    /// [`IngestError::NotPdf`] unless the extension is `.pdf` (any case).
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_backend(path, LopdfBackend)
    }
}

impl<B: PdfBackend> PdfLoader<B> {
    pub fn with_backend(path: impl AsRef<Path>, backend: B) -> Result<Self> {
        let file = SourceFile::open(path)?;
        if file.extension().as_deref() != Some("pdf") {
            return Err(IngestError::NotPdf(file.path().to_path_buf()));
        }
        Ok(Self { file, backend })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Extract every page whose text is not blank. `page_number` keeps the
    /// page's original 0-based index, so skipped pages leave gaps.
    pub fn load(&self) -> Result<Vec<PageRecord>> {
        let path = self.file.path();
        let doc = self.backend.open(path).map_err(|source| {
            tracing::error!("Error opening file: {}: {source}", path.display());
            IngestError::PdfOpen {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let mut pages = Vec::new();
        for index in 0..doc.page_count() {
            let text = match doc.page_text(index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page = index, "Skipping page of {}: {e}", path.display());
                    continue;
                }
            };
            if text.trim().is_empty() {
                continue;
            }
            pages.push(PageRecord {
                text,
                page_number: index as u32,
                source: self.file.source().to_string(),
            });
        }

        if pages.is_empty() {
            tracing::warn!("No pages found in {}", path.display());
        }
        tracing::info!("Found {} pages in {}", pages.len(), path.display());
        Ok(pages)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
