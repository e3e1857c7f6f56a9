//! Application configuration
//!
//! Layered as: built-in defaults → optional `config.toml` in the working
//! directory → `CARBONTRACE_*` environment variables (`__` between nested
//! keys, e.g. `CARBONTRACE_GRAPHHOPPER__API_KEY`).
//!
//! Sections:
//! - `graphhopper`: API base URL, key, timeout and routing profile
//! - `calculation`: per-stage timeout of the emission pipeline
//! - `logging`: log line format and filter

use std::path::Path;

use application::EmissionServiceConfig;
use application::error::ApplicationError;
use application::ports::SecretStorePort;
use integration_graphhopper::GraphHopperConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::telemetry::LoggingConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "CARBONTRACE";

/// Secret store key of the GraphHopper API key
pub const GRAPHHOPPER_API_KEY_SECRET: &str = "graphhopper/api_key";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// GraphHopper API configuration
    #[serde(default)]
    pub graphhopper: GraphHopperConfig,

    /// Emission pipeline configuration
    #[serde(default)]
    pub calculation: EmissionServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit TOML file and environment
    ///
    /// Unlike [`load`](Self::load) the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).format(config::FileFormat::Toml))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("graphhopper.base_url", "https://graphhopper.com/api/1")?
            .set_default("graphhopper.vehicle", "car")?
            .add_source(file)
            // e.g. CARBONTRACE_CALCULATION__STAGE_TIMEOUT=5
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Fill the GraphHopper API key from a secret store if it is still unset
    ///
    /// Values from `config.toml` or `CARBONTRACE_*` variables are never
    /// overridden. A missing secret is not an error here; [`validate`]
    /// reports it.
    ///
    /// [`validate`]: Self::validate
    pub async fn resolve_secrets(&mut self, store: &dyn SecretStorePort) {
        if self.graphhopper.api_key().is_some() {
            debug!("GraphHopper API key already configured");
            return;
        }

        match store.get_secret(GRAPHHOPPER_API_KEY_SECRET).await {
            Ok(value) => {
                self.graphhopper.api_key = Some(SecretString::from(value));
                info!("Loaded graphhopper.api_key from secret store");
            },
            Err(e) => debug!(error = %e, "GraphHopper API key not found in secret store"),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` naming the first invalid section.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.graphhopper.validate().map_err(|e| {
            ApplicationError::Configuration(format!(
                "graphhopper: {e} (set [graphhopper] api_key in config.toml, \
                 {ENV_PREFIX}_GRAPHHOPPER__API_KEY or GRAPHHOPPER_API_KEY)"
            ))
        })?;

        if self.calculation.stage_timeout.is_zero() {
            return Err(ApplicationError::Configuration(
                "calculation: stage_timeout must be greater than 0".to_string(),
            ));
        }

        self.logging
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("logging: {e}")))?;

        Ok(())
    }

    /// Render the configuration as TOML, API key omitted
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Internal(e.to_string()))
    }
}
