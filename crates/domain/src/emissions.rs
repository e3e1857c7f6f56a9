//! Emission model
//!
//! CO₂ mass of a shipment is `weight_kg × distance_km × factor(mode)`,
//! rounded half-up to two decimals once at the end.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Distance, TransportMode};

/// Round half-up to two decimal places
///
/// Inputs in this model are non-negative, where `f64::round` (half away
/// from zero) is half-up.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate kg CO₂ for a recognized transport mode
#[must_use]
pub fn estimate(weight_kg: f64, distance_km: f64, mode: TransportMode) -> f64 {
    round2(weight_kg * distance_km * mode.factor())
}

/// Estimate kg CO₂ for a raw mode key, using the truck factor for unknown keys
#[must_use]
pub fn estimate_for_key(weight_kg: f64, distance_km: f64, mode_key: &str) -> f64 {
    estimate(
        weight_kg,
        distance_km,
        TransportMode::from_key_or_truck(mode_key),
    )
}

/// Estimated CO₂ mass of a shipment
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionEstimate(f64);

impl EmissionEstimate {
    /// Compute the estimate for a routed distance
    #[must_use]
    pub fn compute(weight_kg: f64, distance: Distance, mode: TransportMode) -> Self {
        Self(estimate(weight_kg, distance.km(), mode))
    }

    /// Kilograms of CO₂
    #[must_use]
    pub const fn kg_co2(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for EmissionEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kg CO₂", self.0)
    }
}

/// One row of the emission factor reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Transport mode
    pub mode: TransportMode,
    /// kg CO₂ per km per kg of cargo
    pub kg_co2_per_km_kg: f64,
}

impl EmissionFactor {
    /// Reference table of all recognized modes
    #[must_use]
    pub fn table() -> Vec<Self> {
        TransportMode::ALL
            .into_iter()
            .map(|mode| Self {
                mode,
                kg_co2_per_km_kg: mode.factor(),
            })
            .collect()
    }
}

impl fmt::Display for EmissionFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.mode.emoji(),
            self.mode.label(),
            self.kg_co2_per_km_kg
        )
    }
}
