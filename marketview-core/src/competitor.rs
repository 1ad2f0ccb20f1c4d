//! Competitors found near the subject business.
//!
//! A [`Competitor`] is produced upstream by a places lookup followed by a
//! classification step and is treated as immutable input by the analyzer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest rating a places provider reports.
pub const MAX_RATING: f64 = 5.0;

/// How closely a competitor's offering overlaps the subject business.
///
/// Unrecognised labels deserialise to [`CompetitorType::Unclassified`] so a
/// noisy classifier never aborts an analysis.
///
/// # Examples
/// ```
/// use marketview_core::CompetitorType;
///
/// assert_eq!(CompetitorType::Direct.as_str(), "direct");
/// assert_eq!("franchise".parse::<CompetitorType>(), Ok(CompetitorType::Franchise));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompetitorType {
    /// Offers materially the same product or service.
    Direct,
    /// Serves the same need with a different offering.
    Indirect,
    /// Branch of a franchise chain.
    Franchise,
    /// Neighbouring category that competes for the same spend.
    Adjacent,
    /// Label the classifier produced but the analyzer does not recognise.
    #[serde(other)]
    Unclassified,
}

impl CompetitorType {
    /// Return the wire label for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Indirect => "indirect",
            Self::Franchise => "franchise",
            Self::Adjacent => "adjacent",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for CompetitorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompetitorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "indirect" => Ok(Self::Indirect),
            "franchise" => Ok(Self::Franchise),
            "adjacent" => Ok(Self::Adjacent),
            _ => Err(format!("unknown competitor type '{s}'")),
        }
    }
}

/// Price positioning of a competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarketTier {
    /// Top of the market.
    Premium,
    /// Mainstream pricing.
    MidMarket,
    /// Value-oriented pricing.
    Value,
    /// Lowest-cost offerings.
    Budget,
    /// Tier label the analyzer does not recognise.
    #[serde(other)]
    Unclassified,
}

impl MarketTier {
    /// Return the wire label for this tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::MidMarket => "midMarket",
            Self::Value => "value",
            Self::Budget => "budget",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for MarketTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MarketTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "premium" => Ok(Self::Premium),
            "midmarket" | "mid_market" | "mid-market" => Ok(Self::MidMarket),
            "value" => Ok(Self::Value),
            "budget" => Ok(Self::Budget),
            _ => Err(format!("unknown market tier '{s}'")),
        }
    }
}

/// A business competing with the subject business inside the search radius.
///
/// # Examples
/// ```
/// use marketview_core::{Competitor, CompetitorType, MarketTier};
///
/// let competitor = Competitor::new("Bean There", 1.2, CompetitorType::Direct, MarketTier::Value)
///     .with_rating(4.6)
///     .with_reviews(212)
///     .with_estimated_revenue(640_000.0);
/// assert!(competitor.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    /// Business name as reported by the places provider.
    pub name: String,
    /// Distance from the searched address in miles.
    pub distance: f64,
    /// Average star rating, absent when the provider has none.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Number of public reviews, absent when the provider has none.
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Estimated annual revenue in dollars, absent when no estimate exists.
    #[serde(default)]
    pub estimated_revenue: Option<f64>,
    /// Competitive relationship to the subject business.
    #[serde(rename = "type")]
    pub competitor_type: CompetitorType,
    /// Price positioning.
    pub tier: MarketTier,
}

/// Reasons a [`Competitor`] is rejected before analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompetitorError {
    /// The name was empty or whitespace.
    #[error("competitor name must not be blank")]
    BlankName,
    /// Distance was negative or not finite.
    #[error("distance {0} must be a finite, non-negative number of miles")]
    InvalidDistance(f64),
    /// Rating fell outside `0.0..=5.0`.
    #[error("rating {0} must be between 0.0 and 5.0")]
    InvalidRating(f64),
    /// Revenue was negative or not finite.
    #[error("estimated revenue {0} must be a finite, non-negative amount")]
    InvalidRevenue(f64),
}

impl Competitor {
    /// Construct a competitor with no rating, review count or revenue estimate.
    pub fn new(
        name: impl Into<String>,
        distance: f64,
        competitor_type: CompetitorType,
        tier: MarketTier,
    ) -> Self {
        Self {
            name: name.into(),
            distance,
            rating: None,
            review_count: None,
            estimated_revenue: None,
            competitor_type,
            tier,
        }
    }

    /// Attach a star rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach a review count.
    #[must_use]
    pub fn with_reviews(mut self, review_count: u32) -> Self {
        self.review_count = Some(review_count);
        self
    }

    /// Attach a revenue estimate.
    #[must_use]
    pub fn with_estimated_revenue(mut self, estimated_revenue: f64) -> Self {
        self.estimated_revenue = Some(estimated_revenue);
        self
    }

    /// Check the numeric fields against their documented ranges.
    ///
    /// Absent optional fields are always valid.
    ///
    /// # Errors
    /// Returns [`CompetitorError::BlankName`] for a blank name,
    /// [`CompetitorError::InvalidDistance`] for a negative or non-finite
    /// distance, [`CompetitorError::InvalidRating`] for a rating outside
    /// `0.0..=5.0` and [`CompetitorError::InvalidRevenue`] for a negative or
    /// non-finite revenue estimate.
    pub fn validate(&self) -> Result<(), CompetitorError> {
        if self.name.trim().is_empty() {
            return Err(CompetitorError::BlankName);
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(CompetitorError::InvalidDistance(self.distance));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(CompetitorError::InvalidRating(rating));
            }
        }
        if let Some(revenue) = self.estimated_revenue {
            if !revenue.is_finite() || revenue < 0.0 {
                return Err(CompetitorError::InvalidRevenue(revenue));
            }
        }
        Ok(())
    }

    /// Report whether the classifier produced recognised labels.
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        !matches!(self.competitor_type, CompetitorType::Unclassified)
            && !matches!(self.tier, MarketTier::Unclassified)
    }
}
