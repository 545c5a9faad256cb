//! Static fallback table of well-known cities.
//!
//! Used when the geocoding service is unreachable, misconfigured or finds
//! nothing. Lookup is case-insensitive: exact key first, then substring
//! containment in either direction, in table order.

use crate::domain::{Coordinates, LocationQuery, ResolvedLocation};

/// A known city in the fallback table.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownPlace {
    /// Lowercase lookup key.
    key: String,
    location: ResolvedLocation,
}

impl KnownPlace {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn location(&self) -> &ResolvedLocation {
        &self.location
    }
}

/// An ordered set of known places.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    places: Vec<KnownPlace>,
}

impl FallbackTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place. Places with invalid coordinates are ignored.
    pub fn add(
        &mut self,
        name: &str,
        latitude: f64,
        longitude: f64,
        country: &str,
        region: Option<&str>,
    ) {
        let Ok(coordinates) = Coordinates::new(latitude, longitude) else {
            return;
        };
        self.places.push(KnownPlace {
            key: name.to_lowercase(),
            location: ResolvedLocation::new(
                name,
                coordinates,
                country,
                region.map(str::to_string),
            ),
        });
    }

    /// Look up a query: exact key match, then containment either way.
    pub fn lookup(&self, query: &LocationQuery) -> Option<&ResolvedLocation> {
        let needle = query.as_str().to_lowercase();

        self.places
            .iter()
            .find(|p| p.key == needle)
            .or_else(|| {
                self.places
                    .iter()
                    .find(|p| needle.contains(&p.key) || p.key.contains(&needle))
            })
            .map(|p| &p.location)
    }

    /// Display names of the first `n` places, in table order.
    pub fn example_names(&self, n: usize) -> Vec<String> {
        self.places
            .iter()
            .take(n)
            .map(|p| p.location.name().to_string())
            .collect()
    }

    /// Returns the number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn places(&self) -> &[KnownPlace] {
        &self.places
    }
}

/// Builder for creating fallback tables.
#[derive(Debug, Default)]
pub struct FallbackTableBuilder {
    inner: FallbackTable,
}

impl FallbackTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known place.
    pub fn add(
        mut self,
        name: &str,
        latitude: f64,
        longitude: f64,
        country: &str,
        region: Option<&str>,
    ) -> Self {
        self.inner.add(name, latitude, longitude, country, region);
        self
    }

    /// Build the table.
    pub fn build(self) -> FallbackTable {
        self.inner
    }
}

/// The default table of major layover cities.
pub fn well_known_cities() -> FallbackTable {
    FallbackTableBuilder::new()
        .add("London", 51.5074, -0.1278, "United Kingdom", Some("England"))
        .add("Paris", 48.8566, 2.3522, "France", Some("Île-de-France"))
        .add("New York", 40.7128, -74.0060, "United States", Some("New York"))
        .add("Tokyo", 35.6762, 139.6503, "Japan", Some("Tokyo"))
        .add("Sydney", -33.8688, 151.2093, "Australia", Some("New South Wales"))
        .add("Melbourne", -37.8136, 144.9631, "Australia", Some("Victoria"))
        .add("Hong Kong", 22.3193, 114.1694, "Hong Kong", None)
        .build()
}
