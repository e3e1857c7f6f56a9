//! Transport mode value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Conveyance category used to select an emission factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Road freight, also the fallback for unrecognized modes
    #[default]
    Truck,
    /// Sea freight
    Ship,
    /// Air freight
    Airplane,
    /// Rail freight
    Train,
}

impl TransportMode {
    /// All recognized modes in display order
    pub const ALL: [Self; 4] = [Self::Truck, Self::Ship, Self::Airplane, Self::Train];

    /// Emission factor in kg CO₂ per km per kg of cargo
    #[must_use]
    pub const fn factor(&self) -> f64 {
        match self {
            Self::Truck => 0.10,
            Self::Ship => 0.02,
            Self::Airplane => 0.80,
            Self::Train => 0.04,
        }
    }

    /// Wire key (exact lowercase string)
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Truck => "truck",
            Self::Ship => "ship",
            Self::Airplane => "airplane",
            Self::Train => "train",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Truck => "Truck",
            Self::Ship => "Ship",
            Self::Airplane => "Airplane",
            Self::Train => "Train",
        }
    }

    /// Emoji representation for terminal output
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Truck => "🚚",
            Self::Ship => "🚢",
            Self::Airplane => "✈️",
            Self::Train => "🚆",
        }
    }

    /// Look up a mode by its exact wire key
    ///
    /// Matching is case-sensitive: `"Ship"` is not `"ship"`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.key() == key)
    }

    /// Look up a mode by key, falling back to [`TransportMode::Truck`]
    #[must_use]
    pub fn from_key_or_truck(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            tracing::debug!(mode = %key, "Unrecognized transport mode, using truck factor");
            Self::Truck
        })
    }

    /// Whether the routed road distance is only a proxy for this mode
    ///
    /// Ships and airplanes do not follow road networks; the route distance
    /// is still what the estimate uses.
    #[must_use]
    pub const fn uses_road_proxy(&self) -> bool {
        matches!(self, Self::Ship | Self::Airplane)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| {
            DomainError::validation(format!(
                "Unknown transport mode: {s}. Use truck, ship, airplane or train"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors() {
        assert!((TransportMode::Truck.factor() - 0.10).abs() < f64::EPSILON);
        assert!((TransportMode::Ship.factor() - 0.02).abs() < f64::EPSILON);
        assert!((TransportMode::Airplane.factor() - 0.80).abs() < f64::EPSILON);
        assert!((TransportMode::Train.factor() - 0.04).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_key_exact() {
        assert_eq!(TransportMode::from_key("truck"), Some(TransportMode::Truck));
        assert_eq!(TransportMode::from_key("ship"), Some(TransportMode::Ship));
        assert_eq!(
            TransportMode::from_key("airplane"),
            Some(TransportMode::Airplane)
        );
        assert_eq!(TransportMode::from_key("train"), Some(TransportMode::Train));
    }

    #[test]
    fn test_from_key_is_case_sensitive() {
        assert_eq!(TransportMode::from_key("Ship"), None);
        assert_eq!(TransportMode::from_key("TRAIN"), None);
        assert_eq!(TransportMode::from_key(" ship"), None);
    }

    #[test]
    fn test_fallback_to_truck() {
        assert_eq!(
            TransportMode::from_key_or_truck("unknown-mode"),
            TransportMode::Truck
        );
        assert_eq!(TransportMode::from_key_or_truck("Ship"), TransportMode::Truck);
        assert_eq!(TransportMode::from_key_or_truck(""), TransportMode::Truck);
        assert_eq!(TransportMode::from_key_or_truck("train"), TransportMode::Train);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("ship".parse::<TransportMode>(), Ok(TransportMode::Ship));
        assert!("boat".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_key_roundtrip() {
        for mode in TransportMode::ALL {
            assert_eq!(TransportMode::from_key(mode.key()), Some(mode));
        }
    }

    #[test]
    fn test_road_proxy() {
        assert!(TransportMode::Ship.uses_road_proxy());
        assert!(TransportMode::Airplane.uses_road_proxy());
        assert!(!TransportMode::Truck.uses_road_proxy());
        assert!(!TransportMode::Train.uses_road_proxy());
    }

    #[test]
    fn test_serde_uses_wire_keys() {
        let json = serde_json::to_string(&TransportMode::Airplane).expect("serialize");
        assert_eq!(json, "\"airplane\"");
        let mode: TransportMode = serde_json::from_str("\"train\"").expect("deserialize");
        assert_eq!(mode, TransportMode::Train);
    }

    #[test]
    fn test_display() {
        assert_eq!(TransportMode::Airplane.to_string(), "Airplane");
        assert_eq!(TransportMode::default(), TransportMode::Truck);
    }
}
