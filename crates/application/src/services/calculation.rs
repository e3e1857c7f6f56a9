//! Calculation state machine types
//!
//! `Idle → Calculating → Succeeded | Failed`. Terminal states are replaced by
//! the next invocation; a superseded invocation never writes state.

use std::fmt;

use domain::EmissionReport;
use serde::Serialize;
use thiserror::Error;

/// Which of the two places a lookup failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSide {
    /// Where the cargo departs
    Source,
    /// Where the cargo arrives
    Destination,
}

impl LocationSide {
    /// Pipeline stage that geocodes this side
    #[must_use]
    pub const fn geocode_stage(&self) -> PipelineStage {
        match self {
            Self::Source => PipelineStage::GeocodeSource,
            Self::Destination => PipelineStage::GeocodeDestination,
        }
    }
}

impl fmt::Display for LocationSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Network-bound steps of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Geocoding the source place
    GeocodeSource,
    /// Geocoding the destination place
    GeocodeDestination,
    /// Requesting the road distance
    Route,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeocodeSource => write!(f, "source geocoding"),
            Self::GeocodeDestination => write!(f, "destination geocoding"),
            Self::Route => write!(f, "routing"),
        }
    }
}

/// Why a calculation did not produce a report
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CalculationFailure {
    /// Caller input rejected before any network call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder found no match for one of the places
    #[error("{side} location not found: {place}")]
    NotFound { side: LocationSide, place: String },

    /// Both places resolved but the router found no path
    #[error("No route found from {from} to {to}")]
    NoRoute { from: String, to: String },

    /// Network or payload failure at one stage
    #[error("Transport error during {stage}: {message}")]
    Transport {
        stage: PipelineStage,
        message: String,
    },

    /// A newer invocation replaced this one; its result was discarded
    #[error("Calculation {ticket} was superseded by a newer request")]
    Superseded { ticket: u64 },
}

impl CalculationFailure {
    /// Message suitable for showing to the person who submitted the request
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { .. } => "Please fill all fields with valid values.".to_string(),
            Self::NotFound { side, place } => format!(
                "Could not find the {side} location \"{place}\". Check the spelling and try again."
            ),
            Self::NoRoute { .. } => {
                "Could not calculate route between these locations.".to_string()
            },
            Self::Transport { .. } => {
                "An error occurred while fetching data. Please try again later.".to_string()
            },
            Self::Superseded { .. } => {
                "This calculation was replaced by a newer request.".to_string()
            },
        }
    }

    /// Returns true if repeating the same request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns true if the user should correct their input
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }
}

/// Observable state of the emission calculator
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CalculationState {
    /// Nothing in flight, no result shown
    #[default]
    Idle,
    /// Invocation `ticket` is waiting on the network
    Calculating { ticket: u64 },
    /// Invocation `ticket` produced a report
    Succeeded {
        ticket: u64,
        report: Box<EmissionReport>,
    },
    /// Invocation `ticket` failed
    Failed {
        ticket: u64,
        failure: CalculationFailure,
    },
}

impl CalculationState {
    /// Ticket of the invocation that owns this state, if any
    #[must_use]
    pub const fn ticket(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Calculating { ticket }
            | Self::Succeeded { ticket, .. }
            | Self::Failed { ticket, .. } => Some(*ticket),
        }
    }

    /// Whether this is `Succeeded` or `Failed`
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    /// Whether a calculation is in flight
    #[must_use]
    pub const fn is_calculating(&self) -> bool {
        matches!(self, Self::Calculating { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_side_and_place() {
        let failure = CalculationFailure::NotFound {
            side: LocationSide::Destination,
            place: "Atlantis".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "destination location not found: Atlantis"
        );
        let message = failure.user_message();
        assert!(message.contains("destination"));
        assert!(message.contains("Atlantis"));
        assert!(message.contains("Check the spelling"));
    }

    #[test]
    fn transport_message_suggests_retry() {
        let failure = CalculationFailure::Transport {
            stage: PipelineStage::Route,
            message: "HTTP 503".to_string(),
        };
        assert!(failure.user_message().contains("try again later"));
        assert!(failure.to_string().contains("routing"));
        assert!(failure.is_retryable());
        assert!(!failure.is_user_correctable());
    }

    #[test]
    fn correctable_failures() {
        assert!(
            CalculationFailure::Validation {
                message: "weight".to_string()
            }
            .is_user_correctable()
        );
        assert!(
            !CalculationFailure::NoRoute {
                from: "A".to_string(),
                to: "B".to_string()
            }
            .is_user_correctable()
        );
        assert!(!CalculationFailure::Superseded { ticket: 3 }.is_retryable());
    }

    #[test]
    fn side_maps_to_stage() {
        assert_eq!(
            LocationSide::Source.geocode_stage(),
            PipelineStage::GeocodeSource
        );
        assert_eq!(
            LocationSide::Destination.geocode_stage(),
            PipelineStage::GeocodeDestination
        );
    }

    #[test]
    fn state_tickets() {
        assert_eq!(CalculationState::Idle.ticket(), None);
        assert_eq!(CalculationState::Calculating { ticket: 4 }.ticket(), Some(4));
        assert!(!CalculationState::Calculating { ticket: 4 }.is_terminal());
        assert!(CalculationState::Calculating { ticket: 4 }.is_calculating());
        assert!(
            CalculationState::Failed {
                ticket: 2,
                failure: CalculationFailure::Superseded { ticket: 1 },
            }
            .is_terminal()
        );
    }

    #[test]
    fn failure_serializes_with_reason_tag() {
        let failure = CalculationFailure::NotFound {
            side: LocationSide::Source,
            place: "Nowhere".to_string(),
        };
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["reason"], "not_found");
        assert_eq!(json["side"], "source");
    }

    #[test]
    fn state_serializes_with_state_tag() {
        let json = serde_json::to_value(CalculationState::Calculating { ticket: 7 }).unwrap();
        assert_eq!(json["state"], "calculating");
        assert_eq!(json["ticket"], 7);
    }
}
