//! Domain layer for CarbonTrace
//!
//! Contains the emission model, value objects, and domain errors.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod emissions;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use emissions::{EmissionFactor, estimate, estimate_for_key, round2};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
