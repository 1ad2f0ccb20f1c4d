//! Derived market metrics.
//!
//! [`Metrics`] is produced by the analyzer and never mutated afterwards. The
//! breakdown types are always fully populated; categories with no competitors
//! report zero rather than being omitted.

use serde::{Deserialize, Serialize};

use crate::{CompetitorType, MarketTier, SaturationScore};

/// Competitor counts per [`CompetitorType`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    /// Direct competitors.
    pub direct: u32,
    /// Indirect competitors.
    pub indirect: u32,
    /// Franchise locations.
    pub franchise: u32,
    /// Adjacent-category competitors.
    pub adjacent: u32,
}

impl TypeBreakdown {
    /// Count one competitor of the given type.
    ///
    /// Returns `false` for [`CompetitorType::Unclassified`], which has no
    /// bucket.
    pub const fn record(&mut self, competitor_type: CompetitorType) -> bool {
        match competitor_type {
            CompetitorType::Direct => self.direct += 1,
            CompetitorType::Indirect => self.indirect += 1,
            CompetitorType::Franchise => self.franchise += 1,
            CompetitorType::Adjacent => self.adjacent += 1,
            CompetitorType::Unclassified => return false,
        }
        true
    }

    /// Sum of every bucket.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.direct + self.indirect + self.franchise + self.adjacent
    }
}

/// Competitor counts per [`MarketTier`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBreakdown {
    /// Premium competitors.
    pub premium: u32,
    /// Mid-market competitors.
    pub mid_market: u32,
    /// Value competitors.
    pub value: u32,
    /// Budget competitors.
    pub budget: u32,
}

impl TierBreakdown {
    /// Count one competitor in the given tier.
    ///
    /// Returns `false` for [`MarketTier::Unclassified`].
    pub const fn record(&mut self, tier: MarketTier) -> bool {
        match tier {
            MarketTier::Premium => self.premium += 1,
            MarketTier::MidMarket => self.mid_market += 1,
            MarketTier::Value => self.value += 1,
            MarketTier::Budget => self.budget += 1,
            MarketTier::Unclassified => return false,
        }
        true
    }

    /// Sum of every bucket.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.premium + self.mid_market + self.value + self.budget
    }
}

/// Histogram of ratings in five fixed bands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDistribution {
    /// Ratings of 4.5 and above.
    pub excellent: u32,
    /// Ratings in `4.0..4.5`.
    pub good: u32,
    /// Ratings in `3.5..4.0`.
    pub average: u32,
    /// Ratings in `3.0..3.5`.
    pub below_average: u32,
    /// Ratings below 3.0.
    pub poor: u32,
}

impl RatingDistribution {
    /// Count a rating in its band.
    ///
    /// # Examples
    /// ```
    /// use marketview_core::RatingDistribution;
    ///
    /// let mut distribution = RatingDistribution::default();
    /// distribution.record(4.5);
    /// distribution.record(4.49);
    /// assert_eq!(distribution.excellent, 1);
    /// assert_eq!(distribution.good, 1);
    /// ```
    pub fn record(&mut self, rating: f64) {
        if rating >= 4.5 {
            self.excellent += 1;
        } else if rating >= 4.0 {
            self.good += 1;
        } else if rating >= 3.5 {
            self.average += 1;
        } else if rating >= 3.0 {
            self.below_average += 1;
        } else {
            self.poor += 1;
        }
    }

    /// Number of rated competitors.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.excellent + self.good + self.average + self.below_average + self.poor
    }
}

/// Aggregate view of a local market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Competitors inside the radius, classified or not.
    pub total_competitors: u32,
    /// Competitors classified as direct.
    pub direct_competitors: u32,
    /// Competitors per 10 000 residents.
    #[serde(rename = "densityPer10k")]
    pub density_per_10k: f64,
    /// Residents within the radius.
    pub population_estimate: f64,
    /// Residents per competitor.
    pub pop_per_competitor: f64,
    /// Mean rating over rated competitors.
    pub avg_rating: f64,
    /// Mean review count.
    pub avg_reviews: f64,
    /// Mean estimated revenue.
    pub avg_est_revenue: f64,
    /// Summed estimated revenue.
    pub total_est_revenue: f64,
    /// Counts by competitor type.
    pub type_breakdown: TypeBreakdown,
    /// Counts by market tier.
    pub tier_breakdown: TierBreakdown,
    /// Rating histogram.
    pub rating_distribution: RatingDistribution,
    /// Saturation score, band and colour.
    #[serde(flatten)]
    pub saturation: SaturationScore,
}

impl Metrics {
    /// Fraction of competitors that are direct, `0.0` for an empty market.
    #[must_use]
    pub fn direct_share(&self) -> f64 {
        if self.total_competitors == 0 {
            return 0.0;
        }
        f64::from(self.direct_competitors) / f64::from(self.total_competitors)
    }
}
