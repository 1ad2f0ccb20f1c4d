//! Market saturation analysis for MarketView.
//!
//! The crate turns a list of pre-classified competitors and a population
//! estimate into [`Metrics`](marketview_core::Metrics): counts, averages,
//! categorical breakdowns and a 0–100 saturation score with its risk band.
//!
//! Everything here is a pure function of its inputs. There is no I/O, no
//! clock access (the analysis time is passed in) and no shared state, so
//! analyses may run concurrently and repeat bit-for-bit.
//!
//! # Examples
//!
//! ```
//! use marketview_analyzer::{compute_metrics, compute_saturation_score};
//! use marketview_core::{
//!     Competitor, CompetitorType, MarketTier, Population, RiskBand, SearchRadius,
//! };
//!
//! let competitors: Vec<_> = (0..10)
//!     .map(|i| {
//!         let kind = if i < 3 { CompetitorType::Direct } else { CompetitorType::Adjacent };
//!         Competitor::new(format!("Shop {i}"), 2.0, kind, MarketTier::Value)
//!     })
//!     .collect();
//! let population = Population::new(50_000.0).expect("valid population");
//! let metrics = compute_metrics(&competitors, population, SearchRadius::Ten);
//!
//! assert_eq!(metrics.density_per_10k, 2.0);
//! assert_eq!(metrics.pop_per_competitor, 5_000.0);
//! assert_eq!(compute_saturation_score(&metrics).band, RiskBand::Low);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use chrono::{DateTime, Utc};
use log::{debug, warn};
use marketview_core::{
    AnalysisMetadata, AnalysisRequest, AnalysisResult, Competitor, Metrics, Population,
    RatingDistribution, SaturationScore, SearchRadius, TierBreakdown, TypeBreakdown,
};

mod error;
mod types;

pub use error::AnalysisError;
pub use types::{RiskThresholds, SaturationWeights};

/// Data providers credited when a request names none.
pub const DEFAULT_DATA_SOURCES: [&str; 3] = [
    "Google Places",
    "U.S. Census Bureau population estimates",
    "AI competitor classification",
];

const RESIDENTS_PER_DENSITY_UNIT: f64 = 10_000.0;
const MAX_SCORE: f64 = 100.0;

/// Running sums gathered in a single pass over the competitors.
///
/// Optional fields keep their own counts so each mean covers only the
/// competitors that reported the value.
#[derive(Debug, Default)]
struct Tally {
    total: u32,
    types: TypeBreakdown,
    tiers: TierBreakdown,
    ratings: RatingDistribution,
    rating_sum: f64,
    review_sum: f64,
    reviewed: u32,
    revenue_sum: f64,
    with_revenue: u32,
}

impl Tally {
    #[expect(
        clippy::float_arithmetic,
        reason = "aggregates accumulate floating-point sums"
    )]
    fn collect<'a, I>(competitors: I) -> Self
    where
        I: IntoIterator<Item = &'a Competitor>,
    {
        let mut tally = Self::default();
        for competitor in competitors {
            tally.total += 1;
            let typed = tally.types.record(competitor.competitor_type);
            let tiered = tally.tiers.record(competitor.tier);
            if !(typed && tiered) {
                warn!(
                    "competitor {} is unclassified (type {}, tier {}); counted in total only",
                    competitor.name, competitor.competitor_type, competitor.tier
                );
            }
            if let Some(rating) = competitor.rating {
                tally.ratings.record(rating);
                tally.rating_sum += rating;
            }
            if let Some(reviews) = competitor.review_count {
                tally.review_sum += f64::from(reviews);
                tally.reviewed += 1;
            }
            if let Some(revenue) = competitor.estimated_revenue {
                tally.revenue_sum += revenue;
                tally.with_revenue += 1;
            }
        }
        tally
    }
}

/// Return the competitors that lie inside `radius`.
pub fn within_radius(
    competitors: &[Competitor],
    radius: SearchRadius,
) -> impl Iterator<Item = &Competitor> {
    let limit = radius.miles();
    competitors.iter().filter(move |competitor| {
        let inside = competitor.distance <= limit;
        if !inside {
            debug!(
                "excluding {} at {} mi, outside the {radius} radius",
                competitor.name, competitor.distance
            );
        }
        inside
    })
}

/// Derive market metrics from competitors inside `radius`.
///
/// Competitors beyond the radius are excluded from every figure. Averages
/// cover only the competitors that report the value and are `0.0` when none
/// do. Density is `0.0` for an empty population and residents per
/// competitor equals the population when there are no competitors. Every
/// returned number is finite, and the saturation block is filled by
/// [`compute_saturation_score`].
#[must_use]
pub fn compute_metrics(
    competitors: &[Competitor],
    population: Population,
    radius: SearchRadius,
) -> Metrics {
    metrics_from(within_radius(competitors, radius), population)
}

/// Aggregate competitors already known to lie inside the search radius.
#[expect(
    clippy::float_arithmetic,
    reason = "density and averages are ratios of counts and sums"
)]
fn metrics_from<'a, I>(competitors: I, population: Population) -> Metrics
where
    I: IntoIterator<Item = &'a Competitor>,
{
    let tally = Tally::collect(competitors);
    let residents = population.get();
    let total = f64::from(tally.total);

    let density_per_10k = if residents > 0.0 {
        finite_or_zero(total * RESIDENTS_PER_DENSITY_UNIT / residents)
    } else {
        0.0
    };
    let pop_per_competitor = if tally.total > 0 {
        residents / total
    } else {
        residents
    };

    let mut metrics = Metrics {
        total_competitors: tally.total,
        direct_competitors: tally.types.direct,
        density_per_10k,
        population_estimate: residents,
        pop_per_competitor,
        avg_rating: mean(tally.rating_sum, tally.ratings.total()),
        avg_reviews: mean(tally.review_sum, tally.reviewed),
        avg_est_revenue: mean(tally.revenue_sum, tally.with_revenue),
        total_est_revenue: finite_or_zero(tally.revenue_sum),
        type_breakdown: tally.types,
        tier_breakdown: tally.tiers,
        rating_distribution: tally.ratings,
        saturation: SaturationScore::empty(),
    };
    metrics.saturation = compute_saturation_score(&metrics);
    debug!(
        "computed metrics: {} competitors, density {:.2}/10k, score {:.1} ({})",
        metrics.total_competitors,
        metrics.density_per_10k,
        metrics.saturation.score,
        metrics.saturation.band
    );
    metrics
}

/// Score a market with the default weights and thresholds.
#[must_use]
pub fn compute_saturation_score(metrics: &Metrics) -> SaturationScore {
    score_with(
        metrics,
        SaturationWeights::default(),
        RiskThresholds::default(),
    )
}

/// Score a market with caller-supplied weights and thresholds.
///
/// The score never decreases as density or the share of direct competitors
/// grows, is clamped to `0.0..=100.0`, and its band depends on the score
/// alone. A market without competitors scores `0.0`.
///
/// # Errors
/// Returns [`AnalysisError::InvalidWeights`] or
/// [`AnalysisError::InvalidThresholds`] when either argument fails its
/// `validate` check; nothing is scored in that case.
pub fn compute_saturation_score_with(
    metrics: &Metrics,
    weights: SaturationWeights,
    thresholds: RiskThresholds,
) -> Result<SaturationScore, AnalysisError> {
    let weights = weights.validate()?;
    let thresholds = thresholds.validate()?;
    Ok(score_with(metrics, weights, thresholds))
}

/// Score with weights and thresholds that have already been validated.
#[expect(
    clippy::float_arithmetic,
    reason = "the score is a weighted product of bounded ratios"
)]
fn score_with(
    metrics: &Metrics,
    weights: SaturationWeights,
    thresholds: RiskThresholds,
) -> SaturationScore {
    let density_component = (metrics.density_per_10k / weights.density_ceiling).clamp(0.0, 1.0);
    let direct_weight = weights.direct_weight;
    let pressure = (1.0 - direct_weight) + direct_weight * metrics.direct_share();
    let score = sanitise(MAX_SCORE * density_component * pressure);
    SaturationScore::new(score, thresholds.band_for(score))
}

/// Validate a request and produce its immutable result.
///
/// `analyzed_at` is supplied by the caller so identical inputs give identical
/// results.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] for an unsupported radius,
/// unknown category, blank address or invalid population, and
/// [`AnalysisError::MalformedCompetitor`] for the first competitor that
/// fails validation.
pub fn analyze(
    request: &AnalysisRequest,
    analyzed_at: DateTime<Utc>,
) -> Result<AnalysisResult, AnalysisError> {
    let parameters = request.parameters()?;
    let population = request.population()?;
    for (index, competitor) in request.competitors.iter().enumerate() {
        competitor
            .validate()
            .map_err(|source| AnalysisError::MalformedCompetitor { index, source })?;
    }

    let competitors: Vec<Competitor> = within_radius(&request.competitors, parameters.radius)
        .cloned()
        .collect();
    let metrics = metrics_from(&competitors, population);

    let data_sources = if request.data_sources.is_empty() {
        DEFAULT_DATA_SOURCES.iter().map(|&s| s.to_owned()).collect()
    } else {
        request.data_sources.clone()
    };
    let metadata = AnalysisMetadata::new(parameters, data_sources, analyzed_at);
    Ok(AnalysisResult::new(
        metrics,
        competitors,
        request.ai_insight.clone(),
        metadata,
    ))
}

#[expect(
    clippy::float_arithmetic,
    reason = "means divide a sum by its count"
)]
fn mean(sum: f64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    finite_or_zero(sum / f64::from(count))
}

const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Return `0.0` for non-finite values and clamp to `0.0..=100.0`.
const fn sanitise(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}
