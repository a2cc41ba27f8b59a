//! Core record types produced by the loaders.
//!
//! Code files yield [`Element`]s, Markdown files yield [`MarkdownSection`]s
//! and PDF files yield [`PageRecord`]s. All three carry the absolute path of
//! the file they came from in `source`.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;

// ---------------------------------------------------------------------------
// SourceType
// ---------------------------------------------------------------------------

/// Kind of document a record or chunk originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Pdf,
    Code,
    Markdown,
}

impl SourceType {
    /// Map a file extension (including the dot, any case) to a source type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            ".pdf" => Some(Self::Pdf),
            ".py" => Some(Self::Code),
            ".md" | ".markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Detect the source type of a path from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| Self::from_extension(&format!(".{e}")))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Code => "code",
            Self::Markdown => "markdown",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "code" | "python" | "py" => Some(Self::Code),
            "markdown" | "md" => Some(Self::Markdown),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ElementType
// ---------------------------------------------------------------------------

/// Discriminant of an [`Element`], as written into chunk metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    ModuleDocstring,
    Imports,
    Function,
    Class,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModuleDocstring => "module_docstring",
            Self::Imports => "imports",
            Self::Function => "function",
            Self::Class => "class",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "module_docstring" | "docstring" => Some(Self::ModuleDocstring),
            "imports" | "import" => Some(Self::Imports),
            "function" => Some(Self::Function),
            "class" => Some(Self::Class),
            _ => None,
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Located
// ---------------------------------------------------------------------------

/// Common view over every extracted code element.
///
/// Lines are 1-based and inclusive; `end_line >= start_line`.
pub trait Located {
    fn content(&self) -> &str;
    fn start_line(&self) -> u32;
    fn end_line(&self) -> u32;
    fn source(&self) -> &str;
}

macro_rules! impl_located {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Located for $ty {
                fn content(&self) -> &str {
                    &self.content
                }
                fn start_line(&self) -> u32 {
                    self.start_line
                }
                fn end_line(&self) -> u32 {
                    self.end_line
                }
                fn source(&self) -> &str {
                    &self.source
                }
            }
        )+
    };
}

// ---------------------------------------------------------------------------
// Element variants
// ---------------------------------------------------------------------------

/// The string literal opening a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDocstring {
    /// Raw literal, quotes included.
    pub content: String,
    /// Literal text with prefix and quotes removed.
    pub docstring: String,
    pub start_line: u32,
    pub end_line: u32,
    pub source: String,
}

/// All top-level import statements of a module, newline-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBlock {
    pub content: String,
    pub start_line: u32,
    pub end_line: u32,
    pub source: String,
}

/// A top-level `def`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub content: String,
    pub docstring: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub source: String,
}

/// A top-level `class`, with the names of the methods declared directly in
/// its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub content: String,
    pub docstring: Option<String>,
    pub methods: Vec<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub source: String,
}

impl_located!(ModuleDocstring, ImportBlock, FunctionDef, ClassDef);

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One structurally meaningful unit of a Python source file.
///
/// Serializes flat, tagged by `element_type`. `name` and `docstring` are
/// written for every variant (as `null` where they do not apply); `methods`
/// only for classes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "element_type", rename_all = "snake_case")]
pub enum Element {
    ModuleDocstring(ModuleDocstring),
    Imports(ImportBlock),
    Function(FunctionDef),
    Class(ClassDef),
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::ModuleDocstring(_) => ElementType::ModuleDocstring,
            Self::Imports(_) => ElementType::Imports,
            Self::Function(_) => ElementType::Function,
            Self::Class(_) => ElementType::Class,
        }
    }

    /// Identifier of a function or class; `None` for the other variants.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Function(f) => Some(&f.name),
            Self::Class(c) => Some(&c.name),
            Self::ModuleDocstring(_) | Self::Imports(_) => None,
        }
    }

    pub fn docstring(&self) -> Option<&str> {
        match self {
            Self::ModuleDocstring(d) => Some(&d.docstring),
            Self::Function(f) => f.docstring.as_deref(),
            Self::Class(c) => c.docstring.as_deref(),
            Self::Imports(_) => None,
        }
    }

    /// Method names for a class; empty for everything else.
    pub fn methods(&self) -> &[String] {
        match self {
            Self::Class(c) => &c.methods,
            _ => &[],
        }
    }

    fn located(&self) -> &dyn Located {
        match self {
            Self::ModuleDocstring(d) => d,
            Self::Imports(i) => i,
            Self::Function(f) => f,
            Self::Class(c) => c,
        }
    }
}

impl Located for Element {
    fn content(&self) -> &str {
        self.located().content()
    }
    fn start_line(&self) -> u32 {
        self.located().start_line()
    }
    fn end_line(&self) -> u32 {
        self.located().end_line()
    }
    fn source(&self) -> &str {
        self.located().source()
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let methods = match self {
            Self::Class(c) => Some(&c.methods),
            _ => None,
        };
        let len = if methods.is_some() { 8 } else { 7 };
        let mut record = serializer.serialize_struct("Element", len)?;
        record.serialize_field("element_type", self.element_type().as_str())?;
        record.serialize_field("name", &self.name())?;
        record.serialize_field("content", self.content())?;
        record.serialize_field("docstring", &self.docstring())?;
        if let Some(methods) = methods {
            record.serialize_field("methods", methods)?;
        }
        record.serialize_field("start_line", &self.start_line())?;
        record.serialize_field("end_line", &self.end_line())?;
        record.serialize_field("source", self.source())?;
        record.end()
    }
}

// ---------------------------------------------------------------------------
// MarkdownSection
// ---------------------------------------------------------------------------

/// Body text grouped under one Markdown heading.
///
/// The level-0 section with an empty title holds text before the first heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownSection {
    pub title: String,
    pub level: u32,
    pub content: String,
    pub source: String,
}

// ---------------------------------------------------------------------------
// PageRecord
// ---------------------------------------------------------------------------

/// Text of one non-blank PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub text: String,
    /// 0-based index of the page in the document.
    pub page_number: u32,
    pub source: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
