//! GeoNames `searchJSON` response types.
//!
//! These mirror the wire format; conversion to domain candidates lives in
//! `convert.rs`.

use serde::Deserialize;

/// Top-level search response.
///
/// On failure GeoNames still answers 200 but replaces the result list with
/// a `status` object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total_results_count: Option<u64>,

    #[serde(default)]
    pub geonames: Vec<GeoName>,

    #[serde(default)]
    pub status: Option<ServiceStatus>,
}

/// Error status embedded in a response body.
#[derive(Debug, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    pub value: i64,
}

/// A single place record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoName {
    pub name: String,

    #[serde(default)]
    pub country_name: Option<String>,

    pub lat: NumberOrString,

    pub lng: NumberOrString,

    /// Feature class letter ("P", "A", ...)
    #[serde(default)]
    pub fcl: Option<String>,

    /// Feature code ("PPLC", "ADM1", ...)
    #[serde(default)]
    pub fcode: Option<String>,

    #[serde(default)]
    pub admin_name1: Option<String>,

    #[serde(default)]
    pub population: Option<u64>,
}

/// GeoNames sends coordinates as strings; other deployments send numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::String(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_search_response() {
        let json = r#"{
            "totalResultsCount": 2,
            "geonames": [
                {
                    "name": "Melbourne",
                    "countryName": "Australia",
                    "lat": "-37.814",
                    "lng": "144.96332",
                    "fcl": "P",
                    "fcode": "PPLA",
                    "adminName1": "Victoria",
                    "population": 4917750,
                    "geonameId": 2158177
                },
                {
                    "name": "Melbourne",
                    "countryName": "United States",
                    "lat": 28.08363,
                    "lng": -80.60811,
                    "fcl": "P",
                    "fcode": "PPL",
                    "adminName1": "Florida"
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_results_count, Some(2));
        assert_eq!(response.geonames.len(), 2);
        assert!(response.status.is_none());

        let first = &response.geonames[0];
        assert_eq!(first.country_name.as_deref(), Some("Australia"));
        assert_eq!(first.lat.as_f64(), Some(-37.814));
        assert_eq!(first.population, Some(4917750));

        let second = &response.geonames[1];
        assert_eq!(second.lng.as_f64(), Some(-80.60811));
        assert_eq!(second.population, None);
    }

    #[test]
    fn deserialize_error_status() {
        let json = r#"{"status":{"message":"the hourly limit of 1000 credits has been exceeded","value":19}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.geonames.is_empty());
        let status = response.status.unwrap();
        assert_eq!(status.value, 19);
    }

    #[test]
    fn unparseable_coordinate() {
        assert_eq!(NumberOrString::String("north".into()).as_f64(), None);
        assert_eq!(NumberOrString::String(" 1.5 ".into()).as_f64(), Some(1.5));
    }
}
