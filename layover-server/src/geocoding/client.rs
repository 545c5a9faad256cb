//! GeoNames HTTP client.
//!
//! Searches populated places and administrative areas by free-text name.
//! One request per lookup; no retries.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::convert::convert_search_response;
use super::error::GeocodeError;
use super::provider::{GeocodeCandidate, Geocoder};
use super::types::SearchResponse;

/// Default base URL for the GeoNames web services.
const DEFAULT_BASE_URL: &str = "http://api.geonames.org";

/// Default number of candidates requested per lookup.
const DEFAULT_MAX_ROWS: u8 = 5;

/// Feature classes searched: populated places and administrative areas.
const FEATURE_CLASSES: [&str; 2] = ["P", "A"];

/// Configuration for the GeoNames client.
#[derive(Debug, Clone)]
pub struct GeoNamesConfig {
    /// GeoNames account name, sent as the `username` parameter
    pub username: String,
    /// Base URL for the API (defaults to the public GeoNames service)
    pub base_url: String,
    /// Maximum candidates per lookup
    pub max_rows: u8,
    /// Request timeout in seconds; `None` leaves the transport default
    pub timeout_secs: Option<u64>,
}

impl GeoNamesConfig {
    /// Create a new config with the given account name.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_rows: DEFAULT_MAX_ROWS,
            timeout_secs: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the maximum number of candidates per lookup.
    pub fn with_max_rows(mut self, n: u8) -> Self {
        self.max_rows = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// GeoNames place-search client.
#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    max_rows: u8,
}

impl GeoNamesClient {
    /// Create a new GeoNames client with the given configuration.
    pub fn new(config: GeoNamesConfig) -> Result<Self, GeocodeError> {
        if config.username.trim().is_empty() {
            return Err(GeocodeError::NotConfigured);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            max_rows: config.max_rows,
        })
    }

    /// Query parameters for a search.
    fn search_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            ("maxRows", self.max_rows.to_string()),
        ];
        params.extend(FEATURE_CLASSES.iter().map(|c| ("featureClass", c.to_string())));
        params.push(("username", self.username.clone()));
        params
    }

    /// Search for places by name.
    pub async fn search_places(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let url = format!("{}/searchJSON", self.base_url);

        debug!("GeoNames search for {:?}", query);

        let response = self
            .http
            .get(&url)
            .query(&self.search_params(query))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        let candidates = convert_search_response(parsed)?;
        debug!("GeoNames returned {} candidates for {:?}", candidates.len(), query);

        Ok(candidates)
    }
}

#[async_trait]
impl Geocoder for GeoNamesClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        self.search_places(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = GeoNamesConfig::new("demo")
            .with_base_url("http://localhost:8080")
            .with_max_rows(3)
            .with_timeout(10);

        assert_eq!(config.username, "demo");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_rows, 3);
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn config_defaults() {
        let config = GeoNamesConfig::new("demo");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn client_requires_username() {
        let result = GeoNamesClient::new(GeoNamesConfig::new("  "));
        assert!(matches!(result, Err(GeocodeError::NotConfigured)));
    }

    #[test]
    fn search_params_request_both_feature_classes() {
        let client = GeoNamesClient::new(
            GeoNamesConfig::new("demo").with_base_url("http://localhost:1/"),
        )
        .unwrap();

        assert_eq!(client.base_url, "http://localhost:1");

        let params = client.search_params("Hong Kong");
        assert!(params.contains(&("q", "Hong Kong".to_string())));
        assert!(params.contains(&("maxRows", "5".to_string())));
        assert!(params.contains(&("featureClass", "P".to_string())));
        assert!(params.contains(&("featureClass", "A".to_string())));
        assert!(params.contains(&("username", "demo".to_string())));
    }

    #[tokio::test]
    async fn unreachable_service_is_an_error() {
        // Port 1 is reserved; nothing listens there.
        let client = GeoNamesClient::new(
            GeoNamesConfig::new("demo").with_base_url("http://127.0.0.1:1"),
        )
        .unwrap();

        let result = client.search("London").await;
        assert!(matches!(result, Err(GeocodeError::Http(_))));
    }
}
