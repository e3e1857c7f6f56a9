//! Route query and shipment request value objects

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::TransportMode;

/// Source and destination as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Free-text source place (e.g. "New York, USA")
    pub source: String,
    /// Free-text destination place
    pub destination: String,
}

impl RouteQuery {
    /// Create a new route query
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Check that neither place is blank
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` naming the blank field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.source.trim().is_empty() {
            return Err(DomainError::validation("source location must not be empty"));
        }
        if self.destination.trim().is_empty() {
            return Err(DomainError::validation(
                "destination location must not be empty",
            ));
        }
        Ok(())
    }
}

/// A complete emission calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Where the cargo travels
    #[serde(flatten)]
    pub route: RouteQuery,
    /// Cargo weight in kilograms
    pub weight_kg: f64,
    /// Raw transport mode key; unknown keys fall back to truck
    pub mode: String,
}

impl ShipmentRequest {
    /// Create a new shipment request
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        weight_kg: f64,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            route: RouteQuery::new(source, destination),
            weight_kg,
            mode: mode.into(),
        }
    }

    /// Check places and weight
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` for blank places or a weight
    /// that is not a positive finite number.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.route.validate()?;
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(DomainError::validation(format!(
                "weight must be greater than 0 kg (got {})",
                self.weight_kg
            )));
        }
        Ok(())
    }

    /// Resolved transport mode (truck for unrecognized keys)
    #[must_use]
    pub fn transport_mode(&self) -> TransportMode {
        TransportMode::from_key_or_truck(&self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request_passes() {
        let request = ShipmentRequest::new("New York, USA", "Los Angeles, USA", 100.0, "truck");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn blank_source_rejected() {
        let request = ShipmentRequest::new("   ", "Los Angeles, USA", 100.0, "truck");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn blank_destination_rejected() {
        let request = ShipmentRequest::new("New York, USA", "", 100.0, "truck");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn non_positive_weight_rejected() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let request = ShipmentRequest::new("A", "B", weight, "truck");
            assert!(request.validate().is_err(), "weight {weight} accepted");
        }
    }

    #[test]
    fn unknown_mode_is_not_a_validation_error() {
        let request = ShipmentRequest::new("A", "B", 10.0, "unknown-mode");
        assert!(request.validate().is_ok());
        assert_eq!(request.transport_mode(), TransportMode::Truck);
    }

    #[test]
    fn mode_lookup_is_exact() {
        let request = ShipmentRequest::new("A", "B", 10.0, "ship");
        assert_eq!(request.transport_mode(), TransportMode::Ship);

        let request = ShipmentRequest::new("A", "B", 10.0, "Ship");
        assert_eq!(request.transport_mode(), TransportMode::Truck);
    }

    #[test]
    fn request_deserializes_flat() {
        let json = r#"{"source":"Hamburg","destination":"Munich","weight_kg":5.5,"mode":"train"}"#;
        let request: ShipmentRequest = serde_json::from_str(json).expect("deserialize");
        assert_eq!(request.route.source, "Hamburg");
        assert_eq!(request.transport_mode(), TransportMode::Train);
    }
}
