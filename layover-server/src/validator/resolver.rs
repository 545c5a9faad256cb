//! Location resolution.
//!
//! Maps free text to a [`ResolvedLocation`] through the geocoder, falling
//! back to the static table when the geocoder fails or finds nothing.
//! Resolution never errors: every outcome is a [`ValidationResult`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{LocationQuery, ResolvedLocation, ValidationResult};
use crate::geocoding::{FallbackTable, GeocodeCandidate, Geocoder, well_known_cities};

/// Number of example names offered when nothing matched.
const SUGGESTION_COUNT: usize = 3;

/// Message for blank input.
pub const EMPTY_LOCATION: &str = "Please enter a location";

/// Message for input nothing could resolve.
pub fn not_found_message(input: &str) -> String {
    format!(
        "Could not find \"{}\". Check the spelling or try a nearby major city.",
        input
    )
}

/// Resolves place names using a geocoder and a fallback table.
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    fallback: Arc<FallbackTable>,
}

impl LocationResolver {
    /// Create a resolver backed by the well-known cities table.
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_fallback(geocoder, well_known_cities())
    }

    /// Create a resolver with a custom fallback table.
    pub fn with_fallback(geocoder: Arc<dyn Geocoder>, fallback: FallbackTable) -> Self {
        Self {
            geocoder,
            fallback: Arc::new(fallback),
        }
    }

    /// Resolve free text to a location.
    pub async fn resolve(&self, input: &str) -> ValidationResult {
        let Ok(query) = LocationQuery::parse(input) else {
            return ValidationResult::Invalid {
                error: EMPTY_LOCATION.to_string(),
                suggestions: self.fallback.example_names(SUGGESTION_COUNT),
            };
        };

        debug!("Resolving location {:?}", query.as_str());

        match self.geocoder.search(query.as_str()).await {
            Ok(candidates) if !candidates.is_empty() => {
                if let Some(result) = pick_candidate(candidates) {
                    return result;
                }
            }
            Ok(_) => {
                debug!("Geocoder found nothing for {:?}, trying fallback table", query.as_str());
            }
            Err(e) => {
                warn!(
                    "Geocoding {:?} failed, using fallback table: {}",
                    query.as_str(),
                    e
                );
            }
        }

        self.resolve_from_fallback(&query)
    }

    /// Resolve using only the fallback table.
    fn resolve_from_fallback(&self, query: &LocationQuery) -> ValidationResult {
        match self.fallback.lookup(query) {
            Some(location) => {
                debug!("Fallback table matched {:?} to {}", query.as_str(), location.name());
                ValidationResult::Valid {
                    location: location.clone(),
                    suggestions: Vec::new(),
                }
            }
            None => ValidationResult::Invalid {
                error: not_found_message(query.as_str()),
                suggestions: self.fallback.example_names(SUGGESTION_COUNT),
            },
        }
    }
}

/// Choose the best candidate and list the others as suggestions.
///
/// Populated places beat administrative areas; among populated places the
/// larger population wins; ties keep the earlier candidate. With no
/// populated place at all the first candidate wins.
fn pick_candidate(candidates: Vec<GeocodeCandidate>) -> Option<ValidationResult> {
    let best_idx = best_candidate_index(&candidates)?;

    let suggestions = candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != best_idx)
        .map(|(_, c)| c.full_name())
        .collect();

    let location: ResolvedLocation = candidates.into_iter().nth(best_idx)?.into_resolved();

    Some(ValidationResult::Valid {
        location,
        suggestions,
    })
}

/// Index of the preferred candidate.
fn best_candidate_index(candidates: &[GeocodeCandidate]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;

    for (i, candidate) in candidates.iter().enumerate() {
        if !candidate.is_populated_place() {
            continue;
        }
        let population = candidate.population_or_zero();
        // Strictly greater, so ties keep the first-seen candidate
        if best.is_none_or(|(_, best_pop)| population > best_pop) {
            best = Some((i, population));
        }
    }

    match best {
        Some((i, _)) => Some(i),
        None if !candidates.is_empty() => Some(0),
        None => None,
    }
}
