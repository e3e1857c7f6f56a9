//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Coordinates outside of the WGS84 range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Distance that is negative or not a number
    #[error("Invalid distance: {0}")]
    InvalidDistance(f64),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_creates_correct_error() {
        let err = DomainError::validation("weight must be positive");
        match err {
            DomainError::ValidationError(msg) => assert_eq!(msg, "weight must be positive"),
            _ => unreachable!("Expected ValidationError"),
        }
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }

    #[test]
    fn invalid_coordinates_message_contains_values() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 13.4,
        };
        let msg = err.to_string();
        assert!(msg.contains("91"));
        assert!(msg.contains("13.4"));
    }

    #[test]
    fn invalid_distance_message() {
        let err = DomainError::InvalidDistance(-5.0);
        assert_eq!(err.to_string(), "Invalid distance: -5");
    }
}
