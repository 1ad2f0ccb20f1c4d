//! Behavioural coverage for analysing market saturation.

use std::cell::RefCell;

use marketview_analyzer::{AnalysisError, analyze};
use marketview_core::test_support::{competitors, fixed_time};
use marketview_core::{AnalysisRequest, AnalysisResult, ParameterError, RiskBand};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Outcome = Result<AnalysisResult, AnalysisError>;

/// Request assembled by the `given` steps.
#[fixture]
pub fn request() -> RefCell<Option<AnalysisRequest>> {
    RefCell::new(None)
}

/// Captures the outcome of the analysis for assertions.
#[fixture]
pub fn outcome() -> RefCell<Option<Outcome>> {
    RefCell::new(None)
}

fn coffee_shop_request(count: usize, direct: usize, residents: f64) -> AnalysisRequest {
    AnalysisRequest {
        address: "500 Congress Ave, Austin, TX".into(),
        category: "coffee_shop".into(),
        radius: 10,
        population_estimate: residents,
        competitors: competitors(count, direct),
        ai_insight: String::new(),
        data_sources: Vec::new(),
    }
}

fn analysed(outcome: &RefCell<Option<Outcome>>) -> AnalysisResult {
    let binding = outcome.borrow();
    match binding.as_ref() {
        Some(Ok(result)) => result.clone(),
        Some(Err(err)) => panic!("analysis should succeed, got {err}"),
        None => panic!("analysis outcome must be recorded"),
    }
}

#[given("a coffee shop request with 10 competitors among 50000 residents")]
fn sparse_market(request: &RefCell<Option<AnalysisRequest>>) {
    *request.borrow_mut() = Some(coffee_shop_request(10, 3, 50_000.0));
}

#[given("a coffee shop request with 50 competitors among 25000 residents")]
fn dense_market(request: &RefCell<Option<AnalysisRequest>>) {
    *request.borrow_mut() = Some(coffee_shop_request(50, 15, 25_000.0));
}

#[given("a coffee shop request with no competitors")]
fn empty_market(request: &RefCell<Option<AnalysisRequest>>) {
    *request.borrow_mut() = Some(coffee_shop_request(0, 0, 10_000.0));
}

#[given("a coffee shop request with a 15 mile radius")]
fn unsupported_radius(request: &RefCell<Option<AnalysisRequest>>) {
    let mut built = coffee_shop_request(5, 1, 10_000.0);
    built.radius = 15;
    *request.borrow_mut() = Some(built);
}

#[when("the market is analysed")]
fn analyse_market(
    request: &RefCell<Option<AnalysisRequest>>,
    outcome: &RefCell<Option<Outcome>>,
) {
    let binding = request.borrow();
    let built = binding
        .as_ref()
        .unwrap_or_else(|| panic!("request must be initialised"));
    *outcome.borrow_mut() = Some(analyze(built, fixed_time()));
}

#[then("the market is rated low risk")]
fn rated_low(outcome: &RefCell<Option<Outcome>>) {
    let result = analysed(outcome);
    assert_eq!(result.metrics().saturation.band, RiskBand::Low);
    assert_eq!(result.metrics().saturation.color, RiskBand::Low.color());
}

#[then("the market is rated elevated risk")]
fn rated_elevated(outcome: &RefCell<Option<Outcome>>) {
    let result = analysed(outcome);
    assert_eq!(result.metrics().saturation.band, RiskBand::Elevated);
}

#[then("the density is 2 competitors per 10000 residents")]
fn sparse_density(outcome: &RefCell<Option<Outcome>>) {
    let result = analysed(outcome);
    assert_eq!(result.metrics().density_per_10k.to_bits(), 2.0_f64.to_bits());
    assert_eq!(result.metrics().total_competitors, 10);
}

#[then("the density is 20 competitors per 10000 residents")]
fn dense_density(outcome: &RefCell<Option<Outcome>>) {
    let result = analysed(outcome);
    assert_eq!(
        result.metrics().density_per_10k.to_bits(),
        20.0_f64.to_bits()
    );
    assert_eq!(result.metrics().direct_competitors, 15);
}

#[then("the saturation score is zero")]
fn zero_score(outcome: &RefCell<Option<Outcome>>) {
    let result = analysed(outcome);
    let metrics = result.metrics();
    assert_eq!(metrics.saturation.score.to_bits(), 0.0_f64.to_bits());
    assert_eq!(metrics.total_competitors, 0);
    assert_eq!(metrics.avg_rating.to_bits(), 0.0_f64.to_bits());
}

#[then("the analysis is rejected for an unsupported radius")]
fn rejected_radius(outcome: &RefCell<Option<Outcome>>) {
    let binding = outcome.borrow();
    match binding.as_ref() {
        Some(Err(AnalysisError::InvalidParameter(ParameterError::UnsupportedRadius(miles)))) => {
            assert_eq!(*miles, 15);
        }
        Some(Err(other)) => panic!("unexpected error: {other}"),
        Some(Ok(_)) => panic!("expected the radius to be rejected"),
        None => panic!("analysis outcome must be recorded"),
    }
}

#[scenario(path = "tests/features/saturation.feature", index = 0)]
fn sparse_market_is_low_risk(
    request: RefCell<Option<AnalysisRequest>>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (request, outcome);
}

#[scenario(path = "tests/features/saturation.feature", index = 1)]
fn dense_market_is_elevated_risk(
    request: RefCell<Option<AnalysisRequest>>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (request, outcome);
}

#[scenario(path = "tests/features/saturation.feature", index = 2)]
fn empty_market_scores_zero(
    request: RefCell<Option<AnalysisRequest>>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (request, outcome);
}

#[scenario(path = "tests/features/saturation.feature", index = 3)]
fn unsupported_radius_is_rejected(
    request: RefCell<Option<AnalysisRequest>>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (request, outcome);
}
