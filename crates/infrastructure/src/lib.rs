//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! GraphHopper clients, and owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ENV_PREFIX, GRAPHHOPPER_API_KEY_SECRET};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
