//! Error types emitted by the MarketView CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use marketview_analyzer::AnalysisError;
#[cfg(feature = "store-sqlite")]
use marketview_core::SqliteSavedSearchStoreError;
use thiserror::Error;

/// Errors emitted by the MarketView CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag or positional name.
        field: &'static str,
        /// Environment variable that may supply the value.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature that provides the operation.
        feature: &'static str,
        /// What the user asked for.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag or positional name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag or positional name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag or positional name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading the analysis request failed.
    #[error("failed to read analysis request at {path:?}: {source}")]
    ReadRequest {
        /// Request file.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Analysis request JSON could not be decoded.
    #[error("failed to parse analysis request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request file.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The analyzer rejected the request.
    #[error("analysis of {path:?} failed: {source}")]
    Analysis {
        /// Request file.
        path: Utf8PathBuf,
        /// Validation failure reported by the analyzer.
        #[source]
        source: AnalysisError,
    },
    /// Creating the directory for the saved-search database failed.
    #[error("failed to prepare saved-search directory for {path:?}: {source}")]
    PrepareSavedSearches {
        /// Database path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening, reading or writing the saved-search database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("saved-search database {path:?} failed: {source}")]
    SavedSearches {
        /// Database path.
        path: Utf8PathBuf,
        /// Store failure.
        #[source]
        source: SqliteSavedSearchStoreError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
