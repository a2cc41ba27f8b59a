//! Chunk schema consumed by downstream chunkers and embedders.
//!
//! A [`Chunk`] wraps a piece of retrievable content together with a
//! [`ChunkMetadata`] record whose fields are filled selectively depending on
//! the chunk's [`SourceType`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Element, Located, MarkdownSection, PageRecord, SourceType};

/// Build a deterministic chunk ID: v5 UUID (DNS namespace) over
/// `"{source} : {chunk_index}"`.
pub fn generate_chunk_id(source: &str, chunk_index: usize) -> String {
    let unique = format!("{source} : {chunk_index}");
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, unique.as_bytes()).to_string()
}

// ---------------------------------------------------------------------------
// ChunkMetadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub function_name: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub start_line: Option<u32>,
    #[serde(default)]
    pub end_line: Option<u32>,
    #[serde(default)]
    pub header_level: Option<u32>,
    #[serde(default)]
    pub element_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default = "random_id")]
    pub id: String,
    pub content: String,
    pub source: String,
    pub source_type: SourceType,
    #[serde(default)]
    pub metadata: ChunkMetadata,
    #[serde(default)]
    pub token_count: usize,
    #[serde(default)]
    pub chunk_index: usize,
    #[serde(default)]
    pub parent_id: Option<String>,
}

fn random_id() -> String {
    Uuid::new_v4().to_string()
}

impl Chunk {
    /// Create a chunk with a random ID and empty metadata.
    pub fn new(content: impl Into<String>, source: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            id: random_id(),
            content: content.into(),
            source: source.into(),
            source_type,
            metadata: ChunkMetadata::default(),
            token_count: 0,
            chunk_index: 0,
            parent_id: None,
        }
    }

    /// Chunk for one PDF page; the ID is derived from `(source, chunk_index)`.
    pub fn from_page(page: &PageRecord, chunk_index: usize) -> Self {
        Self {
            id: generate_chunk_id(&page.source, chunk_index),
            chunk_index,
            metadata: ChunkMetadata {
                page_number: Some(page.page_number),
                ..ChunkMetadata::default()
            },
            ..Self::new(page.text.clone(), page.source.clone(), SourceType::Pdf)
        }
    }

    /// Chunk for one code element.
    pub fn from_element(element: &Element, chunk_index: usize) -> Self {
        let (function_name, class_name) = match element {
            Element::Function(f) => (Some(f.name.clone()), None),
            Element::Class(c) => (None, Some(c.name.clone())),
            Element::ModuleDocstring(_) | Element::Imports(_) => (None, None),
        };
        Self {
            id: generate_chunk_id(element.source(), chunk_index),
            chunk_index,
            metadata: ChunkMetadata {
                function_name,
                class_name,
                start_line: Some(element.start_line()),
                end_line: Some(element.end_line()),
                element_type: Some(element.element_type().as_str().to_string()),
                ..ChunkMetadata::default()
            },
            ..Self::new(element.content(), element.source(), SourceType::Code)
        }
    }

    /// Chunk for one Markdown section.
    pub fn from_section(section: &MarkdownSection, chunk_index: usize) -> Self {
        Self {
            id: generate_chunk_id(&section.source, chunk_index),
            chunk_index,
            metadata: ChunkMetadata {
                section_title: Some(section.title.clone()),
                header_level: Some(section.level),
                ..ChunkMetadata::default()
            },
            ..Self::new(section.content.clone(), section.source.clone(), SourceType::Markdown)
        }
    }

    pub fn to_dict(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_dict(data: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(data)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
