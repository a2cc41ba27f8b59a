//! Native tree-sitter parser handle for Python sources.
//!
//! The grammar is statically linked; there is no process-wide parser
//! state. A [`CodeParser`] is constructed explicitly and owned by whoever
//! extracts with it (see [`crate::ingestion::code::CodeLoader::with_parser`]).
//!
//! `tree_sitter::Parser` needs `&mut self` to parse, so a fresh one is built
//! on every call from the stored grammar. `Parser::new()` is a single
//! allocation and `set_language` is a pointer swap.

use crate::error::{IngestError, Result};

/// Owned handle to the Python grammar.
#[derive(Clone)]
pub struct CodeParser {
    language: tree_sitter::Language,
}

impl CodeParser {
    /// Create a parser for the Python grammar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// The grammar this parser installs.
    pub fn language(&self) -> &tree_sitter::Language {
        &self.language
    }

    /// Parse `content` and return the concrete syntax tree.
    ///
    /// Syntax errors do not fail the parse; they surface as `ERROR` nodes in
    /// the returned tree.
    pub fn parse(&self, content: &str) -> Result<tree_sitter::Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| IngestError::Parse(format!("Language version mismatch: {e}")))?;

        parser.parse(content, None).ok_or_else(|| {
            IngestError::Parse("tree-sitter returned None (timeout or cancellation)".into())
        })
    }
}

impl Default for CodeParser {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
