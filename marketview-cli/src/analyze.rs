//! Analyze command implementation for the MarketView CLI.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::info;
use marketview_analyzer::analyze;
use marketview_core::{AnalysisRequest, AnalysisResult};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_ANALYZE_REQUEST, ARG_SAVED_DB, CliError, ENV_ANALYZE_REQUEST, require_existing,
    write_json,
};

/// CLI arguments for the `analyze` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "analyze",
    long_about = "Score market saturation for a prospective business. The \
                 request is a JSON-encoded AnalysisRequest carrying the \
                 address, category, radius, population estimate and \
                 pre-classified competitors. The result is printed as JSON \
                 and, when a saved-search database is configured, appended \
                 to it.",
    about = "Analyse market saturation for a request"
)]
#[ortho_config(prefix = "MARKETVIEW")]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON file containing an AnalysisRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// SQLite database that keeps saved searches.
    #[arg(long = ARG_SAVED_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) saved_db: Option<Utf8PathBuf>,
}

impl AnalyzeArgs {
    pub(crate) fn into_config(self) -> Result<AnalyzeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AnalyzeConfig::try_from(merged)
    }
}

/// Resolved `analyze` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnalyzeConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Where to save the result, if anywhere.
    pub(crate) saved_db: Option<Utf8PathBuf>,
}

impl AnalyzeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_ANALYZE_REQUEST)
    }
}

impl TryFrom<AnalyzeArgs> for AnalyzeConfig {
    type Error = CliError;

    fn try_from(args: AnalyzeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_ANALYZE_REQUEST,
            env: ENV_ANALYZE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            saved_db: args.saved_db,
        })
    }
}

pub(super) fn run_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_analyze_with(args, Utc::now(), &mut stdout)
}

pub(super) fn run_analyze_with(
    args: AnalyzeArgs,
    analyzed_at: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let result = execute_analyze(&config, analyzed_at)?;
    write_json(writer, &result)
}

fn execute_analyze(
    config: &AnalyzeConfig,
    analyzed_at: DateTime<Utc>,
) -> Result<AnalysisResult, CliError> {
    let request = load_analysis_request(&config.request_path)?;
    let result = analyze(&request, analyzed_at).map_err(|source| CliError::Analysis {
        path: config.request_path.clone(),
        source,
    })?;
    info!(
        "{} scored {:.1} ({}) from {} competitors",
        result.metadata().address,
        result.metrics().saturation.score,
        result.metrics().saturation.band,
        result.metrics().total_competitors
    );
    if let Some(saved_db) = &config.saved_db {
        save_result(saved_db, &result)?;
    }
    Ok(result)
}

/// Loads a JSON-encoded [`AnalysisRequest`] from disk.
pub(super) fn load_analysis_request(path: &Utf8Path) -> Result<AnalysisRequest, CliError> {
    let text = marketview_fs::read_to_string(path).map_err(|source| CliError::ReadRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(feature = "store-sqlite")]
fn save_result(path: &Utf8Path, result: &AnalysisResult) -> Result<(), CliError> {
    use marketview_core::SavedSearchStore;

    let mut store = crate::saved::open_saved_searches(path)?;
    let id = store
        .save(result)
        .map_err(|source| CliError::SavedSearches {
            path: path.to_path_buf(),
            source,
        })?;
    info!("saved analysis {id} to {path}");
    Ok(())
}

#[cfg(not(feature = "store-sqlite"))]
fn save_result(_path: &Utf8Path, _result: &AnalysisResult) -> Result<(), CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "saving analyses",
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AnalyzeConfig, CliError> {
    let merged = AnalyzeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AnalyzeConfig::try_from(merged)
}
