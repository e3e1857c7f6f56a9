//! GraphHopper service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the GraphHopper geocoding and routing API
#[derive(Clone, Serialize, Deserialize)]
pub struct GraphHopperConfig {
    /// Base URL of the GraphHopper API, without trailing endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Routing profile sent as `vehicle`
    #[serde(default = "default_vehicle")]
    pub vehicle: String,
}

impl std::fmt::Debug for GraphHopperConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphHopperConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("vehicle", &self.vehicle)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://graphhopper.com/api/1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_vehicle() -> String {
    "car".to_string()
}

impl Default for GraphHopperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            vehicle: default_vehicle(),
        }
    }
}

impl GraphHopperConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Exposed API key, if configured and non-blank
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if let Err(e) = Url::parse(&self.base_url) {
            return Err(format!("base_url is not a valid URL: {e}"));
        }

        if self.api_key().is_none() {
            return Err("api_key must be set".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.vehicle.trim().is_empty() {
            return Err("vehicle must not be empty".to_string());
        }

        Ok(())
    }
}
