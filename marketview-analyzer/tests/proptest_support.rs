//! Proptest strategies for saturation property tests.
//!
//! Generated competitors always satisfy `Competitor::validate` and sit inside
//! the smallest search radius, so every generated market is analysed in full.
//! Ratings, review counts and revenue estimates are each absent at random.

use marketview_core::{Competitor, CompetitorType, MarketTier};
use proptest::prelude::*;

/// Strategy for a recognised competitor type.
pub fn competitor_type_strategy() -> impl Strategy<Value = CompetitorType> {
    prop_oneof![
        Just(CompetitorType::Direct),
        Just(CompetitorType::Indirect),
        Just(CompetitorType::Franchise),
        Just(CompetitorType::Adjacent),
    ]
}

/// Strategy for a recognised market tier.
pub fn tier_strategy() -> impl Strategy<Value = MarketTier> {
    prop_oneof![
        Just(MarketTier::Premium),
        Just(MarketTier::MidMarket),
        Just(MarketTier::Value),
        Just(MarketTier::Budget),
    ]
}

/// Strategy for one valid, classified competitor within five miles.
pub fn competitor_strategy() -> impl Strategy<Value = Competitor> {
    (
        0.0_f64..=5.0_f64,
        proptest::option::of(0.0_f64..=5.0_f64),
        proptest::option::of(0_u32..5_000_u32),
        proptest::option::of(0.0_f64..5_000_000.0_f64),
        competitor_type_strategy(),
        tier_strategy(),
    )
        .prop_map(|(distance, rating, reviews, revenue, kind, tier)| Competitor {
            name: "Generated".to_owned(),
            distance,
            rating,
            review_count: reviews,
            estimated_revenue: revenue,
            competitor_type: kind,
            tier,
        })
}

/// Strategy for a market of `min_count..=max_count` competitors.
pub fn market_strategy(
    min_count: usize,
    max_count: usize,
) -> impl Strategy<Value = Vec<Competitor>> {
    proptest::collection::vec(competitor_strategy(), min_count..=max_count)
}

/// Build `count` identical competitors, the first `direct` of which are
/// direct and the rest adjacent.
#[must_use]
pub fn mixed_market(count: usize, direct: usize) -> Vec<Competitor> {
    (0..count)
        .map(|index| {
            let kind = if index < direct {
                CompetitorType::Direct
            } else {
                CompetitorType::Adjacent
            };
            Competitor::new("Mixed", 1.0, kind, MarketTier::Value)
        })
        .collect()
}
