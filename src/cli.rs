//! Command-line interface definitions and handlers.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, Settings};
use crate::error::Result;
use crate::ingestion::{load_dir, load_file, Document};

#[derive(Parser, Debug)]
#[command(
    name = "docingest",
    version,
    about = "Load PDF, Markdown and Python files into retrieval-ready records"
)]
pub struct Cli {
    /// Settings file (defaults to ./docingest.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one file's records as JSON.
    Load {
        path: PathBuf,
        /// Emit chunk records instead of raw loader records.
        #[arg(long)]
        chunks: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Load every supported file in a directory and write one JSON file each.
    Ingest {
        /// Input directory (defaults to the configured raw data dir).
        dir: Option<PathBuf>,
        /// Output directory (defaults to the configured processed data dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the effective settings as YAML.
    Config,
}

/// Execute a parsed command, writing results to stdout.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Load {
            path,
            chunks,
            pretty,
        } => {
            let doc = load_file(&path)?;
            let value = if chunks {
                serde_json::to_value(doc.into_chunks())?
            } else {
                serde_json::to_value(&doc)?
            };
            let json = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            writeln!(out, "{json}")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Ingest { dir, out: out_dir } => {
            let input = dir.unwrap_or_else(|| settings.raw_dir());
            let output = out_dir.unwrap_or_else(|| settings.processed_dir());
            let summary = ingest(&input, &output)?;
            writeln!(
                out,
                "Loaded {} files ({} failed), {} records written to {}",
                summary.loaded,
                summary.failed,
                summary.records,
                output.display()
            )?;
            Ok(if summary.failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Config => {
            write!(out, "{}", render_settings(&settings)?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Outcome of an [`ingest`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub loaded: usize,
    pub failed: usize,
    pub records: usize,
}

/// Load everything under `input` and mirror it into `output` as
/// `<relative path>.json` files.
pub fn ingest(input: &Path, output: &Path) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    for (path, result) in load_dir(input)? {
        // load_dir already logged the failure.
        let Ok(doc) = result else {
            summary.failed += 1;
            continue;
        };
        write_document(input, output, &path, &doc)?;
        summary.loaded += 1;
        summary.records += doc.len();
    }
    tracing::info!(
        loaded = summary.loaded,
        failed = summary.failed,
        records = summary.records,
        "ingest finished"
    );
    Ok(summary)
}

fn write_document(input: &Path, output: &Path, path: &Path, doc: &Document) -> Result<()> {
    let relative = path.strip_prefix(input).unwrap_or(path);
    let mut target = output.join(relative).into_os_string();
    target.push(".json");
    let target = PathBuf::from(target);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, serde_json::to_string_pretty(doc)?)?;
    Ok(())
}

/// Settings as YAML, for `docingest config`.
pub fn render_settings(settings: &Settings) -> Result<String> {
    Ok(serde_yaml::to_string(settings)?)
}
