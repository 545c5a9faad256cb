//! Geocoding: turning place names into coordinates.
//!
//! The primary source is the GeoNames place search, reached through the
//! [`Geocoder`] trait so tests and offline deployments can substitute a
//! [`StaticGeocoder`]. A small table of well-known cities backs it up.

mod client;
mod convert;
mod error;
mod fallback;
mod mock;
mod provider;
mod types;

pub use client::{GeoNamesClient, GeoNamesConfig};
pub use error::GeocodeError;
pub use fallback::{FallbackTable, FallbackTableBuilder, KnownPlace, well_known_cities};
pub use mock::StaticGeocoder;
pub use provider::{FeatureClass, GeocodeCandidate, Geocoder};
pub use types::{GeoName, NumberOrString, SearchResponse, ServiceStatus};
