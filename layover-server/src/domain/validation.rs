//! Validation outcomes.
//!
//! Expected failures (unknown places, impossible timings) are values, not
//! errors, so callers can always render guidance text.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::location::ResolvedLocation;

/// A request to check a single journey leg.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyQuery {
    /// Free-text departure place.
    pub from: String,

    /// Free-text arrival place.
    pub to: String,

    pub departure: DateTime<FixedOffset>,

    pub arrival: DateTime<FixedOffset>,
}

impl JourneyQuery {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        departure: DateTime<FixedOffset>,
        arrival: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            departure,
            arrival,
        }
    }
}

/// Outcome of resolving one place name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationResult {
    Valid {
        location: ResolvedLocation,
        /// Other candidates the name could have meant.
        suggestions: Vec<String>,
    },
    Invalid {
        error: String,
        /// Names the user might have meant to type.
        suggestions: Vec<String>,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    /// The resolved location, if any.
    pub fn location(&self) -> Option<&ResolvedLocation> {
        match self {
            ValidationResult::Valid { location, .. } => Some(location),
            ValidationResult::Invalid { .. } => None,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            ValidationResult::Valid { suggestions, .. }
            | ValidationResult::Invalid { suggestions, .. } => suggestions,
        }
    }
}

/// Outcome of validating a journey leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JourneyValidationResult {
    Valid {
        from: ResolvedLocation,
        to: ResolvedLocation,
        distance_km: f64,
    },
    Invalid {
        error: String,
        /// Present when both ends resolved but the timing is implausible.
        #[serde(skip_serializing_if = "Option::is_none")]
        distance_km: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<ResolvedLocation>,
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<ResolvedLocation>,
    },
}

impl JourneyValidationResult {
    /// An invalid result with no resolved endpoints.
    pub fn unresolved(error: impl Into<String>) -> Self {
        JourneyValidationResult::Invalid {
            error: error.into(),
            distance_km: None,
            from: None,
            to: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, JourneyValidationResult::Valid { .. })
    }

    pub fn distance_km(&self) -> Option<f64> {
        match self {
            JourneyValidationResult::Valid { distance_km, .. } => Some(*distance_km),
            JourneyValidationResult::Invalid { distance_km, .. } => *distance_km,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            JourneyValidationResult::Valid { .. } => None,
            JourneyValidationResult::Invalid { error, .. } => Some(error),
        }
    }
}
