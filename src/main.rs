use std::process::ExitCode;

use clap::Parser;

use docingest::cli::{run, Cli};
use docingest::observability::init_logging;

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
