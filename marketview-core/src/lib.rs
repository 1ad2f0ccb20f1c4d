//! Core domain types for the MarketView saturation engine.
//!
//! The crate defines the data the analyzer consumes and produces:
//! [`Competitor`] records, validated [`AnalysisParameters`], derived
//! [`Metrics`] and the immutable [`AnalysisResult`]. It also hosts the two
//! capability seams the surrounding system plugs into:
//! [`CompetitorClassifier`] for labelling raw places, and
//! [`SavedSearchStore`] for persisting finished analyses.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod classifier;
pub mod competitor;
pub mod metrics;
pub mod params;
pub mod result;
pub mod risk;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use classifier::{Classification, CompetitorClassifier, RawPlace, build_competitors};
pub use competitor::{Competitor, CompetitorError, CompetitorType, MarketTier};
pub use metrics::{Metrics, RatingDistribution, TierBreakdown, TypeBreakdown};
pub use params::{
    AnalysisParameters, AnalysisRequest, BusinessCategory, ParameterError, Population,
    SearchRadius,
};
pub use result::{AnalysisMetadata, AnalysisResult};
pub use risk::{RiskBand, SaturationScore};
pub use store::{SavedSearch, SavedSearchId, SavedSearchStore};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteSavedSearchStore, SqliteSavedSearchStoreError};
