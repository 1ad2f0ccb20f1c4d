//! Test-only collaborators used by unit and behaviour tests: an in-memory
//! `SavedSearchStore`, a table-driven `CompetitorClassifier`, and fixtures.

use std::collections::HashMap;
use std::convert::Infallible;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    AnalysisMetadata, AnalysisResult, BusinessCategory, Classification, Competitor,
    CompetitorClassifier, CompetitorType, MarketTier, Metrics, RatingDistribution, RawPlace,
    SaturationScore, SavedSearch, SavedSearchId, SavedSearchStore, SearchRadius, TierBreakdown,
    TypeBreakdown,
};

/// In-memory `SavedSearchStore` implementation used in tests.
#[derive(Default, Debug)]
pub struct MemorySavedSearchStore {
    searches: Vec<SavedSearch>,
    next_id: u64,
}

impl SavedSearchStore for MemorySavedSearchStore {
    type Error = Infallible;

    fn save(&mut self, result: &AnalysisResult) -> Result<SavedSearchId, Self::Error> {
        self.next_id += 1;
        let id = SavedSearchId(self.next_id);
        self.searches.push(SavedSearch {
            id,
            result: result.clone(),
        });
        Ok(id)
    }

    fn list(&self) -> Result<Vec<SavedSearch>, Self::Error> {
        Ok(self.searches.iter().rev().cloned().collect())
    }

    fn remove(&mut self, id: SavedSearchId) -> Result<bool, Self::Error> {
        let before = self.searches.len();
        self.searches.retain(|search| search.id != id);
        Ok(self.searches.len() != before)
    }
}

/// `CompetitorClassifier` that looks places up by name.
///
/// Unknown names are [`Classification::UNCLASSIFIED`].
#[derive(Default, Debug, Clone)]
pub struct FixedClassifier {
    labels: HashMap<String, Classification>,
}

impl FixedClassifier {
    /// Register the labels for a place name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, classification: Classification) -> Self {
        self.labels.insert(name.into(), classification);
        self
    }
}

impl CompetitorClassifier for FixedClassifier {
    fn classify(&self, place: &RawPlace) -> Classification {
        self.labels
            .get(&place.name)
            .copied()
            .unwrap_or(Classification::UNCLASSIFIED)
    }
}

/// Fixed timestamp used wherever a test needs an analysis time.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Build `count` competitors, the first `direct` of which are direct.
///
/// Every competitor is one mile away, rated 4.0, with 100 reviews and
/// $500 000 of estimated revenue.
#[must_use]
pub fn competitors(count: usize, direct: usize) -> Vec<Competitor> {
    (0..count)
        .map(|index| {
            let competitor_type = if index < direct {
                CompetitorType::Direct
            } else {
                CompetitorType::Indirect
            };
            Competitor::new(
                format!("Competitor {index}"),
                1.0,
                competitor_type,
                MarketTier::MidMarket,
            )
            .with_rating(4.0)
            .with_reviews(100)
            .with_estimated_revenue(500_000.0)
        })
        .collect()
}

/// A minimal analysis result for an empty market at `address`.
#[must_use]
pub fn sample_result(address: &str) -> AnalysisResult {
    let metrics = Metrics {
        total_competitors: 0,
        direct_competitors: 0,
        density_per_10k: 0.0,
        population_estimate: 10_000.0,
        pop_per_competitor: 10_000.0,
        avg_rating: 0.0,
        avg_reviews: 0.0,
        avg_est_revenue: 0.0,
        total_est_revenue: 0.0,
        type_breakdown: TypeBreakdown::default(),
        tier_breakdown: TierBreakdown::default(),
        rating_distribution: RatingDistribution::default(),
        saturation: SaturationScore::empty(),
    };
    let metadata = AnalysisMetadata {
        address: address.to_owned(),
        category: BusinessCategory::CoffeeShop,
        radius: SearchRadius::Ten,
        data_sources: vec!["fixture".to_owned()],
        analyzed_at: fixed_time(),
    };
    AnalysisResult::new(metrics, Vec::new(), "Quiet market.".to_owned(), metadata)
}
