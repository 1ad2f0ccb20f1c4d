//! Tunable constants for saturation scoring.
#![forbid(unsafe_code)]

use marketview_core::RiskBand;

use crate::AnalysisError;

/// Weights turning density and competitive mix into a score.
///
/// The score is `100 × min(density / density_ceiling, 1) × pressure`, where
/// `pressure = 1 − direct_weight + direct_weight × direct_share`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationWeights {
    /// Competitors per 10 000 residents at which density alone saturates.
    pub density_ceiling: f64,
    /// How much of the score depends on the share of direct competitors,
    /// in `0.0..=1.0`.
    pub direct_weight: f64,
}

impl SaturationWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidWeights`] when the ceiling is not a
    /// positive finite number or the direct weight lies outside `0.0..=1.0`.
    pub fn validate(self) -> Result<Self, AnalysisError> {
        if !self.density_ceiling.is_finite() || self.density_ceiling <= 0.0 {
            return Err(AnalysisError::InvalidWeights {
                reason: "density ceiling must be positive and finite",
            });
        }
        if !(0.0..=1.0).contains(&self.direct_weight) {
            return Err(AnalysisError::InvalidWeights {
                reason: "direct weight must lie within 0.0..=1.0",
            });
        }
        Ok(self)
    }
}

impl Default for SaturationWeights {
    fn default() -> Self {
        Self {
            density_ceiling: 25.0,
            direct_weight: 0.4,
        }
    }
}

/// Lower bounds of each band above [`RiskBand::Low`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    /// Scores at or above this are at least moderate.
    pub moderate: f64,
    /// Scores at or above this are at least elevated.
    pub elevated: f64,
    /// Scores at or above this are at least high.
    pub high: f64,
    /// Scores at or above this are severe.
    pub severe: f64,
}

impl RiskThresholds {
    /// Validate the thresholds and return a copy.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidThresholds`] unless every bound is
    /// finite, bounds ascend strictly and all lie within `(0, 100]`.
    pub fn validate(self) -> Result<Self, AnalysisError> {
        let bounds = [self.moderate, self.elevated, self.high, self.severe];
        let in_range = bounds
            .iter()
            .all(|bound| bound.is_finite() && *bound > 0.0 && *bound <= 100.0);
        let ascending = bounds.windows(2).all(|pair| match pair {
            [lower, upper] => lower < upper,
            _ => false,
        });
        if in_range && ascending {
            Ok(self)
        } else {
            Err(AnalysisError::InvalidThresholds)
        }
    }

    /// Classify a score.
    ///
    /// # Examples
    /// ```
    /// use marketview_analyzer::RiskThresholds;
    /// use marketview_core::RiskBand;
    ///
    /// let thresholds = RiskThresholds::default();
    /// assert_eq!(thresholds.band_for(0.0), RiskBand::Low);
    /// assert_eq!(thresholds.band_for(40.0), RiskBand::Elevated);
    /// assert_eq!(thresholds.band_for(100.0), RiskBand::Severe);
    /// ```
    #[must_use]
    pub const fn band_for(&self, score: f64) -> RiskBand {
        if score >= self.severe {
            RiskBand::Severe
        } else if score >= self.high {
            RiskBand::High
        } else if score >= self.elevated {
            RiskBand::Elevated
        } else if score >= self.moderate {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            moderate: 20.0,
            elevated: 40.0,
            high: 60.0,
            severe: 80.0,
        }
    }
}
