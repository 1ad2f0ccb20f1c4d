//! Error types raised while analysing a market.
#![forbid(unsafe_code)]

use marketview_core::{CompetitorError, ParameterError};
use thiserror::Error;

/// Errors raised before any metrics are computed.
///
/// Degenerate markets (no competitors, zero population) are not errors; they
/// produce finite metrics in the lowest risk band.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A search parameter violated its contract.
    #[error("invalid analysis parameter: {0}")]
    InvalidParameter(#[from] ParameterError),
    /// A competitor entry failed validation.
    #[error("competitor {index} is malformed: {source}")]
    MalformedCompetitor {
        /// Position of the entry in the request.
        index: usize,
        /// Validation failure.
        #[source]
        source: CompetitorError,
    },
    /// Scoring weights were unusable.
    #[error("saturation weights are invalid: {reason}")]
    InvalidWeights {
        /// Which constraint failed.
        reason: &'static str,
    },
    /// Risk band thresholds were unusable.
    #[error("risk thresholds must be finite and strictly ascending within (0, 100]")]
    InvalidThresholds,
}
