//! docingest is a document ingestion front end for retrieval pipelines.
//!
//! Loaders turn PDF, Markdown and Python files into ordered records (pages,
//! heading sections, structural code elements), and the chunk schema wraps
//! those records for downstream embedding and search.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod observability;
pub mod types;
