//! Facade crate for the MarketView saturation engine.
//!
//! This crate re-exports the core domain types and exposes the analyzer and
//! the SQLite saved-search store behind feature flags.

#![forbid(unsafe_code)]

pub use marketview_core::{
    AnalysisMetadata, AnalysisParameters, AnalysisRequest, AnalysisResult, BusinessCategory,
    Classification, Competitor, CompetitorClassifier, CompetitorError, CompetitorType, MarketTier,
    Metrics, ParameterError, Population, RatingDistribution, RawPlace, RiskBand, SaturationScore,
    SavedSearch, SavedSearchId, SavedSearchStore, SearchRadius, TierBreakdown, TypeBreakdown,
    build_competitors,
};

#[cfg(feature = "store-sqlite")]
pub use marketview_core::{SqliteSavedSearchStore, SqliteSavedSearchStoreError};

#[cfg(feature = "analyzer")]
pub use marketview_analyzer::{
    AnalysisError, DEFAULT_DATA_SOURCES, RiskThresholds, SaturationWeights, analyze,
    compute_metrics, compute_saturation_score, compute_saturation_score_with, within_radius,
};
