//! Domain error types.
//!
//! These errors represent values that cannot be constructed because they
//! would break a domain invariant. They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude outside [-90, 90] or not finite
    #[error("latitude {0} is out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] or not finite
    #[error("longitude {0} is out of range [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// A location name was empty after normalisation
    #[error("location name must not be empty")]
    EmptyLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::LatitudeOutOfRange(91.5);
        assert_eq!(err.to_string(), "latitude 91.5 is out of range [-90, 90]");

        let err = DomainError::LongitudeOutOfRange(-181.0);
        assert_eq!(err.to_string(), "longitude -181 is out of range [-180, 180]");

        let err = DomainError::EmptyLocation;
        assert_eq!(err.to_string(), "location name must not be empty");
    }
}
