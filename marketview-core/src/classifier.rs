//! Classify raw places into competitors.
//!
//! The places lookup returns businesses with a location and review data but
//! no competitive context. A [`CompetitorClassifier`] assigns the
//! [`CompetitorType`] and [`MarketTier`]; in production this is an AI call,
//! in tests a fixed table. [`build_competitors`] ties the two together and
//! measures each place's distance from the searched address.

use geo::{Coord, Distance, Haversine, Point};
use log::debug;

use crate::{Competitor, CompetitorType, MarketTier, SearchRadius};

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1_609.344;

/// A business returned by the places lookup, before classification.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlace {
    /// Business name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Average star rating, if any.
    pub rating: Option<f64>,
    /// Number of reviews, if reported.
    pub review_count: Option<u32>,
    /// Estimated annual revenue in dollars, if estimated.
    pub estimated_revenue: Option<f64>,
}

impl RawPlace {
    /// Construct a place with no rating, reviews or revenue estimate.
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            location,
            rating: None,
            review_count: None,
            estimated_revenue: None,
        }
    }
}

/// Competitive labels assigned to a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Competitive relationship.
    pub competitor_type: CompetitorType,
    /// Price positioning.
    pub tier: MarketTier,
}

impl Classification {
    /// Labels used when a classifier cannot decide.
    pub const UNCLASSIFIED: Self = Self {
        competitor_type: CompetitorType::Unclassified,
        tier: MarketTier::Unclassified,
    };
}

/// Assign competitive labels to a raw place.
///
/// Implementations must be `Send + Sync` so one classifier can serve
/// concurrent analyses. The method is infallible: a classifier that cannot
/// decide returns [`Classification::UNCLASSIFIED`], which the analyzer counts
/// towards the total but not towards any breakdown bucket.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use marketview_core::{
///     Classification, CompetitorClassifier, CompetitorType, MarketTier, RawPlace,
/// };
///
/// struct EverythingDirect;
///
/// impl CompetitorClassifier for EverythingDirect {
///     fn classify(&self, _place: &RawPlace) -> Classification {
///         Classification {
///             competitor_type: CompetitorType::Direct,
///             tier: MarketTier::MidMarket,
///         }
///     }
/// }
///
/// let place = RawPlace::new("Corner Cafe", Coord { x: -122.0, y: 37.0 });
/// assert_eq!(EverythingDirect.classify(&place).competitor_type, CompetitorType::Direct);
/// ```
pub trait CompetitorClassifier: Send + Sync {
    /// Return the competitive labels for `place`.
    fn classify(&self, place: &RawPlace) -> Classification;
}

/// Great-circle distance between two WGS84 coordinates, in miles.
#[must_use]
pub fn distance_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to)) / METERS_PER_MILE
}

/// Classify places around `origin` and keep those inside `radius`.
///
/// Returned competitors are ordered by distance, nearest first.
pub fn build_competitors<C>(
    origin: Coord<f64>,
    places: &[RawPlace],
    classifier: &C,
    radius: SearchRadius,
) -> Vec<Competitor>
where
    C: CompetitorClassifier + ?Sized,
{
    let limit = radius.miles();
    let mut competitors: Vec<Competitor> = places
        .iter()
        .filter_map(|place| {
            let distance = distance_miles(origin, place.location);
            if distance > limit {
                debug!("skipping {} at {distance:.2} mi (radius {radius})", place.name);
                return None;
            }
            let Classification {
                competitor_type,
                tier,
            } = classifier.classify(place);
            Some(Competitor {
                name: place.name.clone(),
                distance,
                rating: place.rating,
                review_count: place.review_count,
                estimated_revenue: place.estimated_revenue,
                competitor_type,
                tier,
            })
        })
        .collect();
    competitors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    competitors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedClassifier;
    use rstest::{fixture, rstest};

    const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    /// Roughly one mile of latitude in degrees.
    const ONE_MILE_LAT: f64 = 0.014_49;

    #[fixture]
    fn classifier() -> FixedClassifier {
        FixedClassifier::default().with(
            "Near Cafe",
            Classification {
                competitor_type: CompetitorType::Direct,
                tier: MarketTier::Value,
            },
        )
    }

    #[rstest]
    fn measures_distance_in_miles() {
        let miles = distance_miles(ORIGIN, Coord { x: 0.0, y: ONE_MILE_LAT });
        assert!((miles - 1.0).abs() < 0.01, "expected about one mile, got {miles}");
    }

    #[rstest]
    fn drops_places_outside_radius(classifier: FixedClassifier) {
        let places = vec![
            RawPlace::new("Near Cafe", Coord { x: 0.0, y: ONE_MILE_LAT }),
            RawPlace::new("Far Cafe", Coord { x: 0.0, y: ONE_MILE_LAT * 8.0 }),
        ];
        let competitors = build_competitors(ORIGIN, &places, &classifier, SearchRadius::Five);
        assert_eq!(competitors.len(), 1);
        assert_eq!(competitors[0].name, "Near Cafe");
        assert_eq!(competitors[0].competitor_type, CompetitorType::Direct);
    }

    #[rstest]
    fn orders_competitors_by_distance(classifier: FixedClassifier) {
        let places = vec![
            RawPlace::new("Second", Coord { x: 0.0, y: ONE_MILE_LAT * 3.0 }),
            RawPlace::new("First", Coord { x: 0.0, y: ONE_MILE_LAT }),
        ];
        let competitors = build_competitors(ORIGIN, &places, &classifier, SearchRadius::Ten);
        let names: Vec<_> = competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[rstest]
    fn unknown_places_stay_unclassified(classifier: FixedClassifier) {
        let places = vec![RawPlace::new("Stranger", ORIGIN)];
        let competitors = build_competitors(ORIGIN, &places, &classifier, SearchRadius::Five);
        assert!(!competitors[0].is_classified());
    }
}
