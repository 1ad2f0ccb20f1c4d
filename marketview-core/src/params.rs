//! Caller-supplied analysis parameters and their validation.
//!
//! [`AnalysisRequest`] is the raw JSON shape accepted at the boundary. Its
//! fields are validated into [`SearchRadius`], [`Population`] and
//! [`AnalysisParameters`] before any metrics are computed, so the analyzer
//! itself never sees an out-of-contract value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Competitor;

/// Errors raised when caller-supplied parameters violate their contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// Radius was not one of the supported values.
    #[error("radius {0} is not supported; expected 5, 10 or 20 miles")]
    UnsupportedRadius(u32),
    /// Population was negative or not finite.
    #[error("population estimate {0} must be a finite, non-negative number")]
    InvalidPopulation(f64),
    /// The category label was not recognised.
    #[error("unknown business category '{0}'")]
    UnknownCategory(String),
    /// The address was empty or whitespace.
    #[error("address must not be blank")]
    BlankAddress,
}

/// Search radius around the subject address.
///
/// # Examples
/// ```
/// use marketview_core::SearchRadius;
///
/// let radius = SearchRadius::try_from(10).unwrap();
/// assert_eq!(radius.miles(), 10.0);
/// assert!(SearchRadius::try_from(15).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SearchRadius {
    /// Five miles.
    Five,
    /// Ten miles.
    Ten,
    /// Twenty miles.
    Twenty,
}

impl SearchRadius {
    /// Every supported radius, smallest first.
    pub const ALL: [Self; 3] = [Self::Five, Self::Ten, Self::Twenty];

    /// Radius in whole miles.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Twenty => 20,
        }
    }

    /// Radius in miles as a float for distance comparisons.
    #[must_use]
    pub fn miles(self) -> f64 {
        f64::from(self.as_u32())
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = ParameterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            20 => Ok(Self::Twenty),
            other => Err(ParameterError::UnsupportedRadius(other)),
        }
    }
}

impl From<SearchRadius> for u32 {
    fn from(radius: SearchRadius) -> Self {
        radius.as_u32()
    }
}

impl std::fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mi", self.as_u32())
    }
}

/// Residents living within the search radius.
///
/// Constructed through [`Population::new`], which rejects negative and
/// non-finite estimates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Population(f64);

impl Population {
    /// Validate a population estimate.
    ///
    /// # Errors
    /// Returns [`ParameterError::InvalidPopulation`] when the estimate is
    /// negative or not finite.
    ///
    /// # Examples
    /// ```
    /// use marketview_core::Population;
    ///
    /// assert_eq!(Population::new(50_000.0).unwrap().get(), 50_000.0);
    /// assert!(Population::new(-1.0).is_err());
    /// ```
    pub fn new(estimate: f64) -> Result<Self, ParameterError> {
        if estimate.is_finite() && estimate >= 0.0 {
            Ok(Self(estimate))
        } else {
            Err(ParameterError::InvalidPopulation(estimate))
        }
    }

    /// Return the raw estimate.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Population {
    type Error = ParameterError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Population> for f64 {
    fn from(population: Population) -> Self {
        population.0
    }
}

/// Business categories offered on the analysis form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    /// Full-service and quick-service restaurants.
    Restaurant,
    /// Cafes and coffee shops.
    CoffeeShop,
    /// Bakeries and dessert shops.
    Bakery,
    /// Bars and pubs.
    Bar,
    /// Gyms and fitness studios.
    FitnessCenter,
    /// Hair salons and barbers.
    HairSalon,
    /// Nail salons.
    NailSalon,
    /// Day spas and massage.
    Spa,
    /// General retail.
    RetailStore,
    /// Grocery and convenience stores.
    Grocery,
    /// Mechanics and auto service.
    AutoRepair,
    /// Car washes and detailing.
    CarWash,
    /// Dental offices.
    DentalPractice,
    /// Urgent care and primary care clinics.
    MedicalClinic,
    /// Veterinary clinics.
    Veterinary,
    /// Pet grooming and boarding.
    PetGrooming,
    /// Daycare and preschool.
    Childcare,
    /// Tutoring and test preparation.
    Tutoring,
    /// Laundromats and dry cleaners.
    Laundromat,
    /// Residential real-estate brokerages.
    RealEstateAgency,
}

impl BusinessCategory {
    /// Every category in form order.
    pub const ALL: [Self; 20] = [
        Self::Restaurant,
        Self::CoffeeShop,
        Self::Bakery,
        Self::Bar,
        Self::FitnessCenter,
        Self::HairSalon,
        Self::NailSalon,
        Self::Spa,
        Self::RetailStore,
        Self::Grocery,
        Self::AutoRepair,
        Self::CarWash,
        Self::DentalPractice,
        Self::MedicalClinic,
        Self::Veterinary,
        Self::PetGrooming,
        Self::Childcare,
        Self::Tutoring,
        Self::Laundromat,
        Self::RealEstateAgency,
    ];

    /// Return the category as a `snake_case` `&str`.
    ///
    /// # Examples
    /// ```
    /// use marketview_core::BusinessCategory;
    ///
    /// assert_eq!(BusinessCategory::CoffeeShop.as_str(), "coffee_shop");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::CoffeeShop => "coffee_shop",
            Self::Bakery => "bakery",
            Self::Bar => "bar",
            Self::FitnessCenter => "fitness_center",
            Self::HairSalon => "hair_salon",
            Self::NailSalon => "nail_salon",
            Self::Spa => "spa",
            Self::RetailStore => "retail_store",
            Self::Grocery => "grocery",
            Self::AutoRepair => "auto_repair",
            Self::CarWash => "car_wash",
            Self::DentalPractice => "dental_practice",
            Self::MedicalClinic => "medical_clinic",
            Self::Veterinary => "veterinary",
            Self::PetGrooming => "pet_grooming",
            Self::Childcare => "childcare",
            Self::Tutoring => "tutoring",
            Self::Laundromat => "laundromat",
            Self::RealEstateAgency => "real_estate_agency",
        }
    }
}

impl std::fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BusinessCategory {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalised)
            .ok_or_else(|| ParameterError::UnknownCategory(s.to_owned()))
    }
}

/// Validated parameters describing what was searched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisParameters {
    /// Street address of the prospective business.
    pub address: String,
    /// Business category searched for.
    pub category: BusinessCategory,
    /// Search radius.
    pub radius: SearchRadius,
}

impl AnalysisParameters {
    /// Validate and construct parameters.
    ///
    /// # Errors
    /// Returns [`ParameterError::BlankAddress`] when the address is empty or
    /// whitespace.
    pub fn new(
        address: impl Into<String>,
        category: BusinessCategory,
        radius: SearchRadius,
    ) -> Result<Self, ParameterError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ParameterError::BlankAddress);
        }
        Ok(Self {
            address,
            category,
            radius,
        })
    }
}

/// Raw analysis input as received from a request handler or file.
///
/// Numeric fields keep their wire types so validation can report the
/// offending value instead of failing inside the JSON decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Street address of the prospective business.
    pub address: String,
    /// Business category label.
    pub category: String,
    /// Requested radius in miles.
    pub radius: u32,
    /// Residents within the radius.
    pub population_estimate: f64,
    /// Pre-classified competitors.
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    /// Narrative produced by the AI insight step.
    #[serde(default)]
    pub ai_insight: String,
    /// Labels of the data providers consulted.
    #[serde(default)]
    pub data_sources: Vec<String>,
}

impl AnalysisRequest {
    /// Validate the search parameters.
    ///
    /// # Errors
    /// Returns [`ParameterError::UnknownCategory`],
    /// [`ParameterError::UnsupportedRadius`] or
    /// [`ParameterError::BlankAddress`] for the first field that fails.
    pub fn parameters(&self) -> Result<AnalysisParameters, ParameterError> {
        let category = self.category.parse::<BusinessCategory>()?;
        let radius = SearchRadius::try_from(self.radius)?;
        AnalysisParameters::new(self.address.clone(), category, radius)
    }

    /// Validate the population estimate.
    ///
    /// # Errors
    /// Returns [`ParameterError::InvalidPopulation`] for a negative or
    /// non-finite estimate.
    pub fn population(&self) -> Result<Population, ParameterError> {
        Population::new(self.population_estimate)
    }
}
