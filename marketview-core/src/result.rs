//! The finished output of one market analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AnalysisParameters, BusinessCategory, Competitor, Metrics, SearchRadius};

/// Context recorded alongside the metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Searched address.
    pub address: String,
    /// Searched category.
    pub category: BusinessCategory,
    /// Search radius.
    pub radius: SearchRadius,
    /// Providers the competitor and population data came from.
    pub data_sources: Vec<String>,
    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisMetadata {
    /// Build metadata from validated parameters.
    #[must_use]
    pub fn new(
        parameters: AnalysisParameters,
        data_sources: Vec<String>,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        let AnalysisParameters {
            address,
            category,
            radius,
        } = parameters;
        Self {
            address,
            category,
            radius,
            data_sources,
            analyzed_at,
        }
    }
}

/// Immutable record of one analysis.
///
/// A new analysis produces a new value; nothing updates an existing result.
/// Saved-search stores persist it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    metrics: Metrics,
    competitors: Vec<Competitor>,
    ai_insight: String,
    metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Assemble a result from its parts.
    #[must_use]
    pub const fn new(
        metrics: Metrics,
        competitors: Vec<Competitor>,
        ai_insight: String,
        metadata: AnalysisMetadata,
    ) -> Self {
        Self {
            metrics,
            competitors,
            ai_insight,
            metadata,
        }
    }

    /// Derived metrics.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Competitors the metrics were computed over.
    #[must_use]
    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    /// Narrative insight text.
    #[must_use]
    pub fn ai_insight(&self) -> &str {
        &self.ai_insight
    }

    /// Search context.
    #[must_use]
    pub const fn metadata(&self) -> &AnalysisMetadata {
        &self.metadata
    }
}
