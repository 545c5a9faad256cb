//! Location types.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;

/// A normalised free-text place name as typed by the user.
///
/// Leading and trailing whitespace is removed and every internal run of
/// whitespace is collapsed to a single space. A `LocationQuery` is never
/// empty.
///
/// # Examples
///
/// ```
/// use layover_server::domain::LocationQuery;
///
/// let query = LocationQuery::parse("  Hong\t  Kong ").unwrap();
/// assert_eq!(query.as_str(), "Hong Kong");
///
/// assert!(LocationQuery::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Normalise and validate a place name.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let normalised = input.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalised.is_empty() {
            return Err(DomainError::EmptyLocation);
        }
        Ok(Self(normalised))
    }

    /// Returns the normalised name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A place name resolved to coordinates.
///
/// Produced by the location resolver and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    name: String,
    full_name: String,
    latitude: f64,
    longitude: f64,
    country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
}

impl ResolvedLocation {
    /// Create a resolved location.
    ///
    /// The full name is derived from the name, region and country.
    pub fn new(
        name: impl Into<String>,
        coordinates: Coordinates,
        country: impl Into<String>,
        region: Option<String>,
    ) -> Self {
        let name = name.into();
        let country = country.into();
        let region = region.filter(|r| !r.trim().is_empty());
        let full_name = full_name(&name, region.as_deref(), &country);

        Self {
            name,
            full_name,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            country,
            region,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name, region and country, e.g. "Melbourne, Victoria, Australia".
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

/// Join the non-empty, non-repeated parts of a place name.
pub(crate) fn full_name(name: &str, region: Option<&str>, country: &str) -> String {
    let mut parts: Vec<&str> = vec![name];
    if let Some(region) = region
        && region != name
    {
        parts.push(region);
    }
    if !country.is_empty() && country != name {
        parts.push(country);
    }
    parts.join(", ")
}
