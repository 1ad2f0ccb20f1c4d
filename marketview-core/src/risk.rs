//! Risk bands describing how saturated a market is.
//!
//! # Examples
//! ```
//! use marketview_core::RiskBand;
//!
//! assert_eq!(RiskBand::Low.as_str(), "low");
//! assert_eq!(RiskBand::Severe.color(), "#ef4444");
//! assert!(RiskBand::Moderate < RiskBand::High);
//! ```

use serde::{Deserialize, Serialize};

/// Ordered saturation risk classification, least to most crowded.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RiskBand {
    /// Plenty of room for a new entrant.
    #[default]
    Low,
    /// Some competition; differentiation helps.
    Moderate,
    /// Competitive market.
    Elevated,
    /// Crowded market.
    High,
    /// Saturated market.
    Severe,
}

impl RiskBand {
    /// Every band in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Low,
        Self::Moderate,
        Self::Elevated,
        Self::High,
        Self::Severe,
    ];

    /// Return the band as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Elevated => "elevated",
            Self::High => "high",
            Self::Severe => "severe",
        }
    }

    /// Display colour used by the results page.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#22c55e",
            Self::Moderate => "#84cc16",
            Self::Elevated => "#eab308",
            Self::High => "#f97316",
            Self::Severe => "#ef4444",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|band| band.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown risk band '{s}'"))
    }
}

/// Composite saturation index with its classification.
///
/// Serialised flat into [`Metrics`](crate::Metrics) as `saturationScore`,
/// `riskBand` and `riskColor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturationScore {
    /// Score in `0.0..=100.0`.
    #[serde(rename = "saturationScore")]
    pub score: f64,
    /// Band the score falls into.
    #[serde(rename = "riskBand")]
    pub band: RiskBand,
    /// Colour hint looked up from the band.
    #[serde(rename = "riskColor")]
    pub color: String,
}

impl SaturationScore {
    /// Pair a score with its band; the colour is derived from the band.
    #[must_use]
    pub fn new(score: f64, band: RiskBand) -> Self {
        Self {
            score,
            band,
            color: band.color().to_owned(),
        }
    }

    /// Score for a market with no measurable pressure.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(0.0, RiskBand::Low)
    }
}

impl Default for SaturationScore {
    fn default() -> Self {
        Self::empty()
    }
}
