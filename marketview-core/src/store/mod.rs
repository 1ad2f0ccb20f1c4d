//! Persistence for saved searches.
//!
//! The `SavedSearchStore` trait is the injected storage seam: callers that
//! want to keep an [`AnalysisResult`] hand it to a store, and the analyzer
//! itself never touches storage.

use serde::{Deserialize, Serialize};

use crate::AnalysisResult;

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteSavedSearchStore, SqliteSavedSearchStoreError};

/// Identifier assigned by a store when a search is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedSearchId(pub u64);

impl std::fmt::Display for SavedSearchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted analysis with its store identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    /// Store-assigned identifier.
    pub id: SavedSearchId,
    /// The analysis exactly as it was saved.
    pub result: AnalysisResult,
}

/// Storage for saved searches.
///
/// Results are stored verbatim and listed newest first.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use marketview_core::{AnalysisResult, SavedSearch, SavedSearchId, SavedSearchStore};
///
/// #[derive(Default)]
/// struct VecStore {
///     searches: Vec<SavedSearch>,
/// }
///
/// impl SavedSearchStore for VecStore {
///     type Error = Infallible;
///
///     fn save(&mut self, result: &AnalysisResult) -> Result<SavedSearchId, Self::Error> {
///         let id = SavedSearchId(self.searches.len() as u64 + 1);
///         self.searches.push(SavedSearch { id, result: result.clone() });
///         Ok(id)
///     }
///
///     fn list(&self) -> Result<Vec<SavedSearch>, Self::Error> {
///         Ok(self.searches.iter().rev().cloned().collect())
///     }
///
///     fn remove(&mut self, id: SavedSearchId) -> Result<bool, Self::Error> {
///         let before = self.searches.len();
///         self.searches.retain(|search| search.id != id);
///         Ok(self.searches.len() != before)
///     }
/// }
///
/// let store = VecStore::default();
/// assert!(store.list().unwrap().is_empty());
/// ```
pub trait SavedSearchStore {
    /// Error raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist `result` and return its new identifier.
    ///
    /// # Errors
    /// Returns the backing store's error when the write fails.
    fn save(&mut self, result: &AnalysisResult) -> Result<SavedSearchId, Self::Error>;

    /// Return every saved search, newest first.
    fn list(&self) -> Result<Vec<SavedSearch>, Self::Error>;

    /// Delete a saved search. Returns `false` when `id` was unknown.
    fn remove(&mut self, id: SavedSearchId) -> Result<bool, Self::Error>;
}
