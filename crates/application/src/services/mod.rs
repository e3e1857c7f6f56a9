//! Application services - Use case implementations

mod calculation;
mod emission_service;

pub use calculation::{CalculationFailure, CalculationState, LocationSide, PipelineStage};
pub use emission_service::{EmissionService, EmissionServiceConfig};
