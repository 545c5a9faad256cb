//! Geocoding error types.

/// Errors from a geocoding lookup.
///
/// The location resolver absorbs all of these and falls back to the
/// static table; they only surface in logs.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API returned an error status inside a 2xx body
    #[error("geocoding service error {code}: {message}")]
    Service { code: i64, message: String },

    /// Rate limited or out of credits
    #[error("rate limited by geocoding service")]
    RateLimited,

    /// Response body could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// No geocoding account configured
    #[error("geocoding not configured")]
    NotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = GeocodeError::Service {
            code: 10,
            message: "user account not enabled".into(),
        };
        assert_eq!(
            err.to_string(),
            "geocoding service error 10: user account not enabled"
        );

        assert_eq!(
            GeocodeError::RateLimited.to_string(),
            "rate limited by geocoding service"
        );
        assert_eq!(
            GeocodeError::NotConfigured.to_string(),
            "geocoding not configured"
        );
    }
}
