//! Saved command implementation for the MarketView CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{ARG_SAVED_DB, CliError, ENV_SAVED_DB, require_existing};

/// CLI arguments for the `saved` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "saved",
    long_about = "Print every analysis stored in the saved-search database \
                 as a JSON array, newest first.",
    about = "List saved analyses"
)]
#[ortho_config(prefix = "MARKETVIEW")]
pub(crate) struct SavedArgs {
    /// SQLite database that keeps saved searches.
    #[arg(long = ARG_SAVED_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) saved_db: Option<Utf8PathBuf>,
}

impl SavedArgs {
    pub(crate) fn into_config(self) -> Result<SavedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SavedConfig::try_from(merged)
    }
}

/// Resolved `saved` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SavedConfig {
    /// Path to the saved-search database.
    pub(crate) saved_db: Utf8PathBuf,
}

impl TryFrom<SavedArgs> for SavedConfig {
    type Error = CliError;

    fn try_from(args: SavedArgs) -> Result<Self, Self::Error> {
        let saved_db = args.saved_db.ok_or(CliError::MissingArgument {
            field: ARG_SAVED_DB,
            env: ENV_SAVED_DB,
        })?;
        Ok(Self { saved_db })
    }
}

pub(super) fn run_saved(args: SavedArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_saved_with(args, &mut stdout)
}

pub(super) fn run_saved_with(args: SavedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    // Listing must not create an empty database as a side effect.
    require_existing(&config.saved_db, ARG_SAVED_DB)?;
    list_saved(&config, writer)
}

#[cfg(feature = "store-sqlite")]
fn list_saved(config: &SavedConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    use marketview_core::SavedSearchStore;

    let store = open_saved_searches(&config.saved_db)?;
    let searches = store.list().map_err(|source| CliError::SavedSearches {
        path: config.saved_db.clone(),
        source,
    })?;
    log::debug!("listing {} saved searches", searches.len());
    crate::write_json(writer, &searches)
}

#[cfg(not(feature = "store-sqlite"))]
fn list_saved(_config: &SavedConfig, _writer: &mut dyn Write) -> Result<(), CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "listing saved analyses",
    })
}

/// Open the saved-search database at `path`, creating parent directories.
#[cfg(feature = "store-sqlite")]
pub(crate) fn open_saved_searches(
    path: &camino::Utf8Path,
) -> Result<marketview_core::SqliteSavedSearchStore, CliError> {
    marketview_fs::ensure_parent_dir(path).map_err(|source| {
        CliError::PrepareSavedSearches {
            path: path.to_path_buf(),
            source,
        }
    })?;
    marketview_core::SqliteSavedSearchStore::open(path.as_std_path()).map_err(|source| {
        CliError::SavedSearches {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SavedConfig, CliError> {
    let merged = SavedArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SavedConfig::try_from(merged)
}
