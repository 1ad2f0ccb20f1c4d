//! Command-line interface for running MarketView saturation analyses.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;

mod analyze;
mod error;
mod saved;

pub use error::CliError;

use analyze::{AnalyzeArgs, run_analyze};
use saved::{SavedArgs, run_saved};

pub(crate) const ARG_ANALYZE_REQUEST: &str = "request";
pub(crate) const ARG_SAVED_DB: &str = "saved-db";
pub(crate) const ENV_ANALYZE_REQUEST: &str = "MARKETVIEW_CMDS_ANALYZE_REQUEST_PATH";
pub(crate) const ENV_SAVED_DB: &str = "MARKETVIEW_CMDS_SAVED_SAVED_DB";

/// Run the MarketView CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Saved(args) => run_saved(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "marketview",
    about = "Market saturation analysis for prospective businesses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a market from a JSON analysis request.
    Analyze(AnalyzeArgs),
    /// List previously saved analyses, newest first.
    Saved(SavedArgs),
}

/// Fail unless `path` exists and is a regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match marketview_fs::is_regular_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
