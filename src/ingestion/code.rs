//! Structural extractor for Python source files.
//!
//! Walks only the direct children of the module node. Three passes run over
//! those children:
//!
//! 1. **Docstring**: the first non-comment statement, if it is a bare string
//!    literal.
//! 2. **Imports**: every top-level `import` / `from … import`, aggregated into
//!    one block.
//! 3. **Definitions**: each `def` and `class`, in source order.
//!
//! Nested scopes are never recursed into, except that a class's direct
//! method names are listed on its element. Malformed input degrades to fewer
//! elements instead of failing.

use std::path::Path;

use tree_sitter::{Node, Tree};

use crate::error::Result;
use crate::ingestion::parser::CodeParser;
use crate::ingestion::source::SourceFile;
use crate::types::{ClassDef, Element, FunctionDef, ImportBlock, ModuleDocstring};

/// Top-level node kinds aggregated into the import block.
const IMPORT_KINDS: [&str; 3] = [
    "import_statement",
    "import_from_statement",
    "future_import_statement",
];

// ---------------------------------------------------------------------------
// CodeLoader
// ---------------------------------------------------------------------------

/// Loads one Python file into an ordered list of [`Element`]s.
pub struct CodeLoader {
    file: SourceFile,
    parser: CodeParser,
}

impl CodeLoader {
    /// Validate `path` and pair it with a fresh Python parser.
    ///
    /// Fails with [`crate::error::IngestError::NotFound`] if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_parser(path, CodeParser::new())
    }

    /// Like [`CodeLoader::new`] but reuses a caller-owned parser.
    pub fn with_parser(path: impl AsRef<Path>, parser: CodeParser) -> Result<Self> {
        Ok(Self {
            file: SourceFile::open(path)?,
            parser,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Absolute path written into every element's `source`.
    pub fn source(&self) -> &str {
        self.file.source()
    }

    pub fn parser(&self) -> &CodeParser {
        &self.parser
    }

    /// Read, parse and extract. The file is re-read on every call.
    pub fn load(&self) -> Result<Vec<Element>> {
        let text = self.file.read_text()?;
        let tree = self.parser.parse(&text)?;
        let elements = extract_elements(&tree, &text, self.file.source());

        tracing::info!(
            "Loaded {} elements from {}",
            elements.len(),
            self.file.file_name()
        );
        Ok(elements)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract elements from an already-parsed module.
///
/// Order: module docstring, import block, then functions and classes as
/// they appear at the top level.
pub fn extract_elements(tree: &Tree, text: &str, source: &str) -> Vec<Element> {
    let top_level = named_children(tree.root_node());
    let mut elements = Vec::new();

    if let Some(doc) = module_docstring(&top_level, text, source) {
        elements.push(Element::ModuleDocstring(doc));
    }
    if let Some(imports) = import_block(&top_level, text, source) {
        elements.push(Element::Imports(imports));
    }

    for node in &top_level {
        match node.kind() {
            "function_definition" => {
                if let Some(func) = function_def(*node, text, source) {
                    elements.push(Element::Function(func));
                }
            }
            "class_definition" => {
                if let Some(class) = class_def(*node, text, source) {
                    elements.push(Element::Class(class));
                }
            }
            _ => {}
        }
    }

    elements
}

fn module_docstring(top_level: &[Node<'_>], text: &str, source: &str) -> Option<ModuleDocstring> {
    let (statement, literal) = leading_string(top_level)?;
    let raw = node_text(literal, text);
    let (start_line, end_line) = line_span(statement);
    Some(ModuleDocstring {
        content: raw.to_string(),
        docstring: strip_quotes(raw).to_string(),
        start_line,
        end_line,
        source: source.to_string(),
    })
}

fn import_block(top_level: &[Node<'_>], text: &str, source: &str) -> Option<ImportBlock> {
    let imports: Vec<Node<'_>> = top_level
        .iter()
        .filter(|n| IMPORT_KINDS.contains(&n.kind()))
        .copied()
        .collect();
    let first = imports.first()?;
    let last = imports.last()?;

    let content = imports
        .iter()
        .map(|n| node_text(*n, text))
        .collect::<Vec<_>>()
        .join("\n");

    Some(ImportBlock {
        content,
        start_line: line_span(*first).0,
        end_line: line_span(*last).1,
        source: source.to_string(),
    })
}

fn function_def(node: Node<'_>, text: &str, source: &str) -> Option<FunctionDef> {
    let name = definition_name(node, text)?;
    let (start_line, end_line) = line_span(node);
    Some(FunctionDef {
        name,
        content: node_text(node, text).to_string(),
        docstring: body_docstring(node, text),
        start_line,
        end_line,
        source: source.to_string(),
    })
}

fn class_def(node: Node<'_>, text: &str, source: &str) -> Option<ClassDef> {
    let name = definition_name(node, text)?;

    // Every direct child of the body is considered, not just the first.
    let methods = node
        .child_by_field_name("body")
        .map(|body| {
            named_children(body)
                .into_iter()
                .filter(|child| child.kind() == "function_definition")
                .filter_map(|child| definition_name(child, text))
                .collect()
        })
        .unwrap_or_default();

    let (start_line, end_line) = line_span(node);
    Some(ClassDef {
        name,
        content: node_text(node, text).to_string(),
        docstring: body_docstring(node, text),
        methods,
        start_line,
        end_line,
        source: source.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

fn node_text<'s>(node: Node<'_>, text: &'s str) -> &'s str {
    text.get(node.byte_range()).unwrap_or_default()
}

/// 1-based inclusive line span of `node`.
///
/// A node ending at column 0 stops on the previous line.
fn line_span(node: Node<'_>) -> (u32, u32) {
    let start = node.start_position().row;
    let end = node.end_position();
    let end_row = if end.column == 0 && end.row > start {
        end.row - 1
    } else {
        end.row
    };
    (start as u32 + 1, end_row as u32 + 1)
}

fn definition_name(node: Node<'_>, text: &str) -> Option<String> {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, text))
        .filter(|n| !n.is_empty());
    if name.is_none() {
        tracing::debug!(
            kind = node.kind(),
            line = node.start_position().row + 1,
            "skipping definition without a name"
        );
    }
    name.map(str::to_string)
}

/// The string-literal statement that opens a sequence of statements.
///
/// Comments are skipped; any other statement ends the search. Returns the
/// wrapping statement and the literal node.
fn leading_string<'t>(statements: &[Node<'t>]) -> Option<(Node<'t>, Node<'t>)> {
    for statement in statements {
        match statement.kind() {
            "comment" => continue,
            "expression_statement" => {
                let inner = named_children(*statement);
                return match inner.as_slice() {
                    [literal] if literal.kind() == "string" => Some((*statement, *literal)),
                    _ => None,
                };
            }
            _ => return None,
        }
    }
    None
}

/// Docstring of a `def` or `class`: the leading string of its body block.
fn body_docstring(definition: Node<'_>, text: &str) -> Option<String> {
    let body = definition.child_by_field_name("body")?;
    let statements = named_children(body);
    let (_, literal) = leading_string(&statements)?;
    Some(strip_quotes(node_text(literal, text)).to_string())
}

/// Remove a string prefix (`r`, `b`, `u`, `f`, …) and the surrounding quote
/// run from a Python string literal.
pub(crate) fn strip_quotes(literal: &str) -> &str {
    let body = literal.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if body.len() >= 2 * quote.len() && body.starts_with(quote) && body.ends_with(quote) {
            return &body[quote.len()..body.len() - quote.len()];
        }
    }
    body
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
