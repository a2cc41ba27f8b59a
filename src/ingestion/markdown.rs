//! Markdown loader: splits a document into heading-keyed sections.
//!
//! Line-oriented. A line starting with `#` outside a fenced code block opens
//! a new section; every other non-blank line is appended (trimmed) to the
//! current section. Lines whose trimmed form starts with ```` ``` ```` toggle
//! the fence state and are kept as content.

use std::path::Path;

use crate::error::Result;
use crate::ingestion::source::SourceFile;
use crate::types::MarkdownSection;

/// Loads one Markdown file into [`MarkdownSection`]s.
pub struct MarkdownLoader {
    file: SourceFile,
}

impl MarkdownLoader {
    /// Fails with [`crate::error::IngestError::NotFound`] if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            file: SourceFile::open(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn load(&self) -> Result<Vec<MarkdownSection>> {
        let text = self.file.read_text()?;
        let sections = split_sections(&text, self.file.source());
        tracing::info!(
            "Split {} into {} sections",
            self.file.file_name(),
            sections.len()
        );
        Ok(sections)
    }
}

/// Split `text` into sections.
///
/// The first section always has an empty title and level 0; it holds any
/// content before the first heading.
pub fn split_sections(text: &str, source: &str) -> Vec<MarkdownSection> {
    let mut sections = vec![section(String::new(), 0, source)];
    let mut in_code_block = false;

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
        }

        if line.starts_with('#') && !in_code_block {
            let level = line.chars().take_while(|&c| c == '#').count() as u32;
            let title = line.trim_start_matches('#').trim().to_string();
            sections.push(section(title, level, source));
        } else if !trimmed.is_empty() {
            if let Some(current) = sections.last_mut() {
                current.content.push_str(trimmed);
                current.content.push('\n');
            }
        }
    }

    sections
}

fn section(title: String, level: u32, source: &str) -> MarkdownSection {
    MarkdownSection {
        title,
        level,
        content: String::new(),
        source: source.to_string(),
    }
}
