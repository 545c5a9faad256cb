//! Recommender error types.

use std::fmt;

/// Errors from producing or refining a plan.
#[derive(Debug)]
pub enum RecommendError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Response body or model reply could not be parsed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// The model answered without any usable content
    EmptyReply,

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Client could not be built from its configuration
    NotConfigured(String),
}

impl fmt::Display for RecommendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendError::Http(e) => write!(f, "HTTP error: {e}"),
            RecommendError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RecommendError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            RecommendError::EmptyReply => write!(f, "model returned no recommendations"),
            RecommendError::RateLimited => write!(f, "rate limited by model API"),
            RecommendError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            RecommendError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for RecommendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecommendError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RecommendError {
    fn from(err: reqwest::Error) -> Self {
        RecommendError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            RecommendError::EmptyReply.to_string(),
            "model returned no recommendations"
        );

        let err = RecommendError::ApiError {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = RecommendError::Json {
            message: "expected value".into(),
            body: Some("not json".into()),
        };
        assert_eq!(
            err.to_string(),
            "JSON parse error: expected value (body: not json)"
        );
    }
}
