//! Focused unit tests covering the saved-search listing command.

use super::helpers::Workspace;
use super::*;
use crate::saved::{SavedConfig, config_from_layers_for_test, run_saved_with};
use marketview_core::test_support::sample_result;
use marketview_core::{SavedSearchStore, SqliteSavedSearchStore};
use rstest::rstest;
use serde_json::Value;

#[rstest]
fn converting_saved_without_database_errors() {
    let err = SavedConfig::try_from(SavedArgs::default()).expect_err("missing db should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SAVED_DB);
            assert_eq!(env, ENV_SAVED_DB);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn listing_a_missing_database_does_not_create_it() {
    let workspace = Workspace::new();
    let saved_db = workspace.path("saved.db");
    let args = SavedArgs {
        saved_db: Some(saved_db.clone()),
    };

    let mut stdout = Vec::new();
    let err = run_saved_with(args, &mut stdout).expect_err("missing db should error");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_SAVED_DB);
            assert_eq!(path, saved_db);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
    assert!(!saved_db.exists());
}

#[rstest]
fn lists_saved_searches_newest_first() {
    let workspace = Workspace::new();
    let saved_db = workspace.path("saved.db");
    {
        let mut store = SqliteSavedSearchStore::open(saved_db.as_std_path()).expect("open db");
        store
            .save(&sample_result("1 First St"))
            .expect("save first");
        store
            .save(&sample_result("2 Second St"))
            .expect("save second");
    }
    let args = SavedArgs {
        saved_db: Some(saved_db),
    };

    let mut stdout = Vec::new();
    run_saved_with(args, &mut stdout).expect("listing should succeed");

    let output: Value = serde_json::from_slice(&stdout).expect("output is JSON");
    let entries = output.as_array().expect("output is an array");
    assert_eq!(entries.len(), 2);
    assert_eq!(output[0]["id"], 2);
    assert_eq!(output[0]["result"]["metadata"]["address"], "2 Second St");
    assert_eq!(output[1]["result"]["metadata"]["address"], "1 First St");
}

#[rstest]
fn environment_layer_supplies_database() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let workspace = Workspace::new();
    let env_db = workspace.path("from-env.db");
    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "saved_db": env_db.as_str() }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.saved_db, env_db);
}
