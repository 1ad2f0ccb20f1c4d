//! SQLite-backed store for saved searches.
//!
//! Each row keeps the analysis as a JSON payload alongside a few indexed
//! columns for listing.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::debug;
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::AnalysisResult;

use super::{SavedSearch, SavedSearchId, SavedSearchStore};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS saved_searches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    address TEXT NOT NULL,
    category TEXT NOT NULL,
    analyzed_at TEXT NOT NULL,
    payload TEXT NOT NULL
)";

/// Error raised when reading or writing saved searches.
#[derive(Debug, Error)]
pub enum SqliteSavedSearchStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Encoding a result as JSON failed.
    #[error("failed to encode saved search: {0}")]
    Encode(#[source] serde_json::Error),
    /// A stored payload was not a valid analysis result.
    #[error("failed to decode saved search {id}: {source}")]
    Decode {
        /// Row identifier of the corrupt entry.
        id: u64,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// SQLite returned a row identifier that is not a valid `u64`.
    #[error("saved search id {0} is outside the supported range")]
    IdOutOfRange(i64),
    /// Generic SQLite error when reading or writing rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Saved-search store backed by a single SQLite table.
pub struct SqliteSavedSearchStore {
    connection: Connection,
}

impl fmt::Debug for SqliteSavedSearchStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteSavedSearchStore")
            .field("path", &self.connection.path())
            .finish_non_exhaustive()
    }
}

impl SqliteSavedSearchStore {
    /// Open, creating if necessary, a store at `path`.
    ///
    /// # Errors
    /// Returns [`SqliteSavedSearchStoreError::OpenDatabase`] when the file
    /// cannot be opened and [`SqliteSavedSearchStoreError::Database`] when
    /// the schema cannot be created.
    pub fn open<P>(path: P) -> Result<Self, SqliteSavedSearchStoreError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteSavedSearchStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_connection(connection)
    }

    /// Open a store that lives only as long as the value.
    ///
    /// # Errors
    /// Returns [`SqliteSavedSearchStoreError::Database`] when `SQLite`
    /// cannot allocate the database.
    pub fn in_memory() -> Result<Self, SqliteSavedSearchStoreError> {
        let connection = Connection::open_in_memory()?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, SqliteSavedSearchStoreError> {
        connection.execute(CREATE_TABLE_SQL, [])?;
        Ok(Self { connection })
    }
}

impl SavedSearchStore for SqliteSavedSearchStore {
    type Error = SqliteSavedSearchStoreError;

    fn save(&mut self, result: &AnalysisResult) -> Result<SavedSearchId, Self::Error> {
        let payload = serde_json::to_string(result).map_err(SqliteSavedSearchStoreError::Encode)?;
        let metadata = result.metadata();
        self.connection.execute(
            "INSERT INTO saved_searches (address, category, analyzed_at, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                metadata.address,
                metadata.category.as_str(),
                metadata.analyzed_at.to_rfc3339(),
                payload
            ],
        )?;
        let rowid = self.connection.last_insert_rowid();
        let id = u64::try_from(rowid).map_err(|_| SqliteSavedSearchStoreError::IdOutOfRange(rowid))?;
        debug!("saved search {id} for {}", metadata.address);
        Ok(SavedSearchId(id))
    }

    fn list(&self) -> Result<Vec<SavedSearch>, Self::Error> {
        let mut statement = self
            .connection
            .prepare("SELECT id, payload FROM saved_searches ORDER BY id DESC")?;
        let mut rows = statement.query([])?;
        let mut searches = Vec::new();

        while let Some(row) = rows.next()? {
            let raw_id: i64 = row.get(0)?;
            let payload: String = row.get(1)?;
            let id =
                u64::try_from(raw_id).map_err(|_| SqliteSavedSearchStoreError::IdOutOfRange(raw_id))?;
            let result = serde_json::from_str(&payload)
                .map_err(|source| SqliteSavedSearchStoreError::Decode { id, source })?;
            searches.push(SavedSearch {
                id: SavedSearchId(id),
                result,
            });
        }

        Ok(searches)
    }

    fn remove(&mut self, id: SavedSearchId) -> Result<bool, Self::Error> {
        // SQLite rowids never exceed `i64::MAX`.
        let Ok(raw_id) = i64::try_from(id.0) else {
            return Ok(false);
        };
        let deleted = self
            .connection
            .execute("DELETE FROM saved_searches WHERE id = ?1", [raw_id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_result;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn store() -> SqliteSavedSearchStore {
        SqliteSavedSearchStore::in_memory().expect("open in-memory store")
    }

    #[rstest]
    fn round_trips_results(mut store: SqliteSavedSearchStore) {
        let result = sample_result("12 Pine St");
        let id = store.save(&result).expect("save");
        let saved = store.list().expect("list");
        assert_eq!(saved, vec![SavedSearch { id, result }]);
    }

    #[rstest]
    fn lists_newest_first(mut store: SqliteSavedSearchStore) {
        let first = store.save(&sample_result("1 First St")).expect("save first");
        let second = store.save(&sample_result("2 Second St")).expect("save second");
        let ids: Vec<_> = store.list().expect("list").into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[rstest]
    fn remove_deletes_only_the_requested_row(mut store: SqliteSavedSearchStore) {
        let keep = store.save(&sample_result("1 Keep St")).expect("save keep");
        let drop = store.save(&sample_result("2 Drop St")).expect("save drop");
        assert!(store.remove(drop).expect("remove"));
        assert!(!store.remove(drop).expect("remove again"));
        let ids: Vec<_> = store.list().expect("list").into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[rstest]
    fn persists_across_reopen() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("saved.db");
        let id = {
            let mut store = SqliteSavedSearchStore::open(&path).expect("open");
            store.save(&sample_result("5 Birch St")).expect("save")
        };
        let reopened = SqliteSavedSearchStore::open(&path).expect("reopen");
        let saved = reopened.list().expect("list");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
        assert_eq!(saved[0].result.metadata().address, "5 Birch St");
    }

    #[rstest]
    fn reports_corrupt_payloads(store: SqliteSavedSearchStore) {
        store
            .connection
            .execute(
                "INSERT INTO saved_searches (address, category, analyzed_at, payload)
                 VALUES ('x', 'bar', '2024-01-01T00:00:00Z', 'not json')",
                [],
            )
            .expect("insert corrupt row");
        let err = store.list().expect_err("corrupt payload");
        assert!(matches!(err, SqliteSavedSearchStoreError::Decode { id: 1, .. }));
    }

    #[rstest]
    fn open_fails_for_missing_directory() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("missing").join("saved.db");
        let err = SqliteSavedSearchStore::open(&path).expect_err("missing parent");
        assert!(matches!(err, SqliteSavedSearchStoreError::OpenDatabase { .. }));
    }
}
