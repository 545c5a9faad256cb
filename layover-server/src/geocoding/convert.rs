//! Conversion from GeoNames wire types to geocode candidates.

use tracing::debug;

use crate::domain::Coordinates;

use super::error::GeocodeError;
use super::provider::{FeatureClass, GeocodeCandidate};
use super::types::{GeoName, SearchResponse};

/// GeoNames status codes that mean "slow down" (hourly, daily and weekly
/// credit limits).
const RATE_LIMIT_CODES: [i64; 3] = [18, 19, 20];

/// Convert a search response into candidates.
///
/// An embedded error status becomes an error even though the HTTP status
/// was 2xx. Records with unusable coordinates are skipped.
pub fn convert_search_response(
    response: SearchResponse,
) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    if let Some(status) = response.status {
        if RATE_LIMIT_CODES.contains(&status.value) {
            return Err(GeocodeError::RateLimited);
        }
        return Err(GeocodeError::Service {
            code: status.value,
            message: status.message,
        });
    }

    Ok(response
        .geonames
        .into_iter()
        .filter_map(convert_geoname)
        .collect())
}

/// Convert a single record, returning `None` if its coordinates are invalid.
fn convert_geoname(record: GeoName) -> Option<GeocodeCandidate> {
    let (Some(lat), Some(lng)) = (record.lat.as_f64(), record.lng.as_f64()) else {
        debug!("Skipping {} with unparseable coordinates", record.name);
        return None;
    };

    let coordinates = match Coordinates::new(lat, lng) {
        Ok(c) => c,
        Err(e) => {
            debug!("Skipping {}: {}", record.name, e);
            return None;
        }
    };

    Some(GeocodeCandidate {
        name: record.name,
        country: record.country_name.unwrap_or_default(),
        coordinates,
        feature_class: record
            .fcl
            .as_deref()
            .map(FeatureClass::from_code)
            .unwrap_or(FeatureClass::Other),
        feature_code: record.fcode.filter(|s| !s.is_empty()),
        region: record.admin_name1.filter(|s| !s.trim().is_empty()),
        population: record.population,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        convert_search_response(response)
    }

    #[test]
    fn converts_records() {
        let candidates = parse(
            r#"{"geonames":[{"name":"Tokyo","countryName":"Japan","lat":"35.6895","lng":"139.69171","fcl":"P","fcode":"PPLC","adminName1":"Tokyo","population":8336599}]}"#,
        )
        .unwrap();

        assert_eq!(candidates.len(), 1);
        let tokyo = &candidates[0];
        assert_eq!(tokyo.name, "Tokyo");
        assert_eq!(tokyo.country, "Japan");
        assert_eq!(tokyo.feature_class, FeatureClass::PopulatedPlace);
        assert_eq!(tokyo.feature_code.as_deref(), Some("PPLC"));
        assert_eq!(tokyo.population, Some(8336599));
        assert_eq!(tokyo.coordinates.latitude, 35.6895);
    }

    #[test]
    fn empty_admin_name_becomes_none() {
        let candidates = parse(
            r#"{"geonames":[{"name":"Singapore","countryName":"Singapore","lat":"1.28967","lng":"103.85007","fcl":"P","fcode":"PPLC","adminName1":""}]}"#,
        )
        .unwrap();
        assert_eq!(candidates[0].region, None);
    }

    #[test]
    fn skips_invalid_coordinates() {
        let candidates = parse(
            r#"{"geonames":[
                {"name":"Bad","lat":"abc","lng":"1.0","fcl":"P"},
                {"name":"Worse","lat":"95.0","lng":"1.0","fcl":"P"},
                {"name":"Good","lat":"1.0","lng":"1.0","fcl":"A"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Good");
        assert_eq!(candidates[0].feature_class, FeatureClass::AdministrativeArea);
        assert_eq!(candidates[0].country, "");
    }

    #[test]
    fn rate_limit_status() {
        let err = parse(r#"{"status":{"message":"daily limit exceeded","value":18}}"#).unwrap_err();
        assert!(matches!(err, GeocodeError::RateLimited));
    }

    #[test]
    fn other_status_is_service_error() {
        let err = parse(r#"{"status":{"message":"invalid user","value":10}}"#).unwrap_err();
        match err {
            GeocodeError::Service { code, message } => {
                assert_eq!(code, 10);
                assert_eq!(message, "invalid user");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_results_is_ok_and_empty() {
        let candidates = parse(r#"{"totalResultsCount":0,"geonames":[]}"#).unwrap();
        assert!(candidates.is_empty());
    }
}
