//! The geocoding seam.

use async_trait::async_trait;

use crate::domain::{Coordinates, ResolvedLocation};

use super::error::GeocodeError;

/// Geographic feature classes the resolver distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureClass {
    /// City, town, village (GeoNames class `P`).
    PopulatedPlace,
    /// Country, state, region (GeoNames class `A`).
    AdministrativeArea,
    /// Anything else the service returned.
    Other,
}

impl FeatureClass {
    /// Map a GeoNames feature class letter.
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => FeatureClass::PopulatedPlace,
            "A" => FeatureClass::AdministrativeArea,
            _ => FeatureClass::Other,
        }
    }
}

/// One candidate match returned by a geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub feature_class: FeatureClass,
    /// Service-specific feature code, e.g. "PPLC" for a capital.
    pub feature_code: Option<String>,
    /// First-level administrative area, e.g. a state.
    pub region: Option<String>,
    pub population: Option<u64>,
}

impl GeocodeCandidate {
    pub fn is_populated_place(&self) -> bool {
        self.feature_class == FeatureClass::PopulatedPlace
    }

    /// Population with unknown treated as zero.
    pub fn population_or_zero(&self) -> u64 {
        self.population.unwrap_or(0)
    }

    /// Name, region and country joined for display.
    pub fn full_name(&self) -> String {
        crate::domain::location_full_name(&self.name, self.region.as_deref(), &self.country)
    }

    pub fn into_resolved(self) -> ResolvedLocation {
        ResolvedLocation::new(self.name, self.coordinates, self.country, self.region)
    }
}

/// A place-search capability.
///
/// Implementations issue at most one lookup per call and do not retry.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Search for places matching `query`, best matches first.
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError>;
}
