//! Logging initialization
//!
//! Installs a `tracing` subscriber with an `EnvFilter` and either a human
//! readable or a JSON formatter.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
