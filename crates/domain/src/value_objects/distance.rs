//! Route distance value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::emissions::round2;
use crate::errors::DomainError;

/// A routed distance in kilometers, rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Convert a distance in meters (as reported by the router) to kilometers
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDistance` for negative or non-finite input.
    pub fn from_meters(meters: f64) -> Result<Self, DomainError> {
        if !meters.is_finite() || meters < 0.0 {
            return Err(DomainError::InvalidDistance(meters));
        }
        Ok(Self(round2(meters / 1000.0)))
    }

    /// Create a distance from kilometers
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDistance` for negative or non-finite input.
    pub fn from_km(km: f64) -> Result<Self, DomainError> {
        if !km.is_finite() || km < 0.0 {
            return Err(DomainError::InvalidDistance(km));
        }
        Ok(Self(round2(km)))
    }

    /// Distance in kilometers
    #[must_use]
    pub const fn km(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} km", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meters_to_km() {
        let distance = Distance::from_meters(3_940_000.0).expect("valid");
        assert!((distance.km() - 3940.0).abs() < f64::EPSILON);
    }

    #[test]
    fn meters_rounded_to_two_decimals() {
        let distance = Distance::from_meters(4_488_123.0).expect("valid");
        assert!((distance.km() - 4488.12).abs() < f64::EPSILON);

        let distance = Distance::from_meters(1_234_567.0).expect("valid");
        assert!((distance.km() - 1234.57).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_distance_is_valid() {
        let distance = Distance::from_meters(0.0).expect("valid");
        assert!(distance.km().abs() < f64::EPSILON);
    }

    #[test]
    fn negative_and_nan_rejected() {
        assert!(Distance::from_meters(-1.0).is_err());
        assert!(Distance::from_meters(f64::NAN).is_err());
        assert!(Distance::from_km(f64::INFINITY).is_err());
    }

    #[test]
    fn display_has_unit() {
        let distance = Distance::from_km(200.0).expect("valid");
        assert_eq!(distance.to_string(), "200.00 km");
    }

    #[test]
    fn serializes_as_number() {
        let distance = Distance::from_km(12.5).expect("valid");
        assert_eq!(serde_json::to_string(&distance).expect("serialize"), "12.5");
    }
}
