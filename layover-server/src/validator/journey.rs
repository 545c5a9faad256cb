//! Journey validation: resolve both ends, measure, check the timing.

use tracing::debug;

use crate::domain::{JourneyQuery, JourneyValidationResult, ResolvedLocation, ValidationResult};

use super::distance::haversine_km;
use super::plausibility::check_travel_time;
use super::resolver::LocationResolver;

/// Validates single journey legs.
#[derive(Clone)]
pub struct JourneyValidator {
    resolver: LocationResolver,
}

impl JourneyValidator {
    pub fn new(resolver: LocationResolver) -> Self {
        Self { resolver }
    }

    /// The underlying location resolver.
    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    /// Resolve a single place name.
    pub async fn resolve_location(&self, input: &str) -> ValidationResult {
        self.resolver.resolve(input).await
    }

    /// Validate a journey leg.
    ///
    /// Both ends are looked up concurrently. If either fails, only one error
    /// is reported, the departure side taking precedence, and no distance is
    /// computed. Otherwise the distance and both locations are attached to
    /// the result whether or not the timing is plausible.
    pub async fn validate_journey(&self, query: &JourneyQuery) -> JourneyValidationResult {
        let (from, to) = tokio::join!(
            self.resolver.resolve(&query.from),
            self.resolver.resolve(&query.to)
        );

        let from = match endpoint(from, "Departure location") {
            Ok(location) => location,
            Err(invalid) => return invalid,
        };
        let to = match endpoint(to, "Arrival location") {
            Ok(location) => location,
            Err(invalid) => return invalid,
        };

        let distance_km = haversine_km(from.coordinates(), to.coordinates());

        match check_travel_time(distance_km, query.departure, query.arrival) {
            Ok(speed) => {
                debug!(
                    "Journey {} -> {}: {:.0} km at {:.0} km/h ({:?})",
                    from.name(),
                    to.name(),
                    distance_km,
                    speed.speed_kmh,
                    speed.band
                );
                JourneyValidationResult::Valid {
                    from,
                    to,
                    distance_km,
                }
            }
            Err(e) => {
                debug!(
                    "Journey {} -> {} rejected: {:?}",
                    from.name(),
                    to.name(),
                    e
                );
                JourneyValidationResult::Invalid {
                    error: e.to_string(),
                    distance_km: Some(distance_km),
                    from: Some(from),
                    to: Some(to),
                }
            }
        }
    }
}

/// Unwrap a resolved endpoint or build the prefixed failure.
fn endpoint(
    result: ValidationResult,
    label: &str,
) -> Result<ResolvedLocation, JourneyValidationResult> {
    match result {
        ValidationResult::Valid { location, .. } => Ok(location),
        ValidationResult::Invalid { error, .. } => Err(JourneyValidationResult::unresolved(
            format!("{}: {}", label, error),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, FixedOffset};

    use super::*;
    use crate::domain::parse_timestamp;
    use crate::geocoding::StaticGeocoder;
    use crate::validator::plausibility::{ARRIVAL_BEFORE_DEPARTURE, UNREALISTIC_TRAVEL_TIME};
    use crate::validator::resolver::not_found_message;

    fn t(s: &str) -> DateTime<FixedOffset> {
        parse_timestamp(s).unwrap()
    }

    fn validator(geocoder: StaticGeocoder) -> JourneyValidator {
        JourneyValidator::new(LocationResolver::new(Arc::new(geocoder)))
    }

    #[tokio::test]
    async fn plausible_flight_is_valid() {
        let v = validator(StaticGeocoder::unreachable());
        let query = JourneyQuery::new(
            "Sydney",
            "Melbourne",
            t("2024-03-15T09:00:00+11:00"),
            t("2024-03-15T10:35:00+11:00"),
        );

        match v.validate_journey(&query).await {
            JourneyValidationResult::Valid {
                from,
                to,
                distance_km,
            } => {
                assert_eq!(from.name(), "Sydney");
                assert_eq!(to.name(), "Melbourne");
                assert!((distance_km - 713.4).abs() < 2.0);
            }
            other => panic!("expected valid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn implausible_timing_keeps_distance_and_locations() {
        let v = validator(StaticGeocoder::empty());
        // London to Paris in ten minutes
        let query = JourneyQuery::new(
            "London",
            "Paris",
            t("2024-03-15T09:00"),
            t("2024-03-15T09:10"),
        );

        match v.validate_journey(&query).await {
            JourneyValidationResult::Invalid {
                error,
                distance_km,
                from,
                to,
            } => {
                assert_eq!(error, UNREALISTIC_TRAVEL_TIME);
                assert!(distance_km.unwrap() > 300.0);
                assert_eq!(from.unwrap().name(), "London");
                assert_eq!(to.unwrap().name(), "Paris");
            }
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reversed_times_are_reported_distinctly() {
        let v = validator(StaticGeocoder::empty());
        let query = JourneyQuery::new(
            "Tokyo",
            "Hong Kong",
            t("2024-03-15T12:00"),
            t("2024-03-15T08:00"),
        );

        let result = v.validate_journey(&query).await;
        assert_eq!(result.error(), Some(ARRIVAL_BEFORE_DEPARTURE));
        assert!(result.distance_km().is_some());
    }

    #[tokio::test]
    async fn unresolved_arrival_is_prefixed_and_has_no_distance() {
        let v = validator(StaticGeocoder::empty());
        let query = JourneyQuery::new(
            "London",
            "Zzqxw123",
            t("2024-03-15T09:00"),
            t("2024-03-15T12:00"),
        );

        let result = v.validate_journey(&query).await;
        let expected = format!("Arrival location: {}", not_found_message("Zzqxw123"));
        assert_eq!(result.error(), Some(expected.as_str()));
        assert_eq!(result.distance_km(), None);
    }

    #[tokio::test]
    async fn departure_error_takes_precedence() {
        let v = validator(StaticGeocoder::empty());
        let query = JourneyQuery::new(
            "Qqqq",
            "Zzzz",
            t("2024-03-15T09:00"),
            t("2024-03-15T12:00"),
        );

        let result = v.validate_journey(&query).await;
        let error = result.error().unwrap();
        assert!(error.starts_with("Departure location: "));
        assert!(error.contains("Qqqq"));
        assert!(!error.contains("Zzzz"));
    }

    #[tokio::test]
    async fn both_ends_are_looked_up() {
        let geocoder = StaticGeocoder::empty();
        let v = validator(geocoder.clone());
        let query = JourneyQuery::new(
            "London",
            "Paris",
            t("2024-03-15T09:00"),
            t("2024-03-15T12:00"),
        );

        v.validate_journey(&query).await;
        assert_eq!(geocoder.call_count(), 2);
    }

    #[tokio::test]
    async fn resolve_location_delegates() {
        let v = validator(StaticGeocoder::disabled());
        let result = v.resolve_location("tokyo").await;
        assert_eq!(result.location().unwrap().country(), "Japan");
    }
}
