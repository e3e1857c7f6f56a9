//! Environment-based secret store adapter
//!
//! Reads secrets from environment variables, the way containerized and CI
//! deployments inject the GraphHopper API key.

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;
use std::env;
use tracing::{debug, instrument};

/// Secret store that reads from environment variables
///
/// Keys are transformed to uppercase with slashes and hyphens replaced by
/// underscores. For example: "graphhopper/api-key" becomes "GRAPHHOPPER_API_KEY"
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    /// Create a new environment secret store
    pub const fn new() -> Self {
        Self
    }

    /// Transform a key path to an environment variable name
    fn key_to_env_var(key: &str) -> String {
        key.replace(['/', '-'], "_").to_uppercase()
    }
}

#[async_trait]
impl SecretStorePort for EnvSecretStore {
    #[instrument(skip(self), fields(env_var))]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let env_var = Self::key_to_env_var(key);
        tracing::Span::current().record("env_var", &env_var);

        match env::var(&env_var) {
            Ok(value) if value.trim().is_empty() => Err(ApplicationError::NotFound(format!(
                "Secret is empty: {key} (env: {env_var})"
            ))),
            Ok(value) => {
                debug!("Retrieved secret from environment variable");
                Ok(value)
            },
            Err(env::VarError::NotPresent) => {
                debug!(env_var = %env_var, "Secret not found in environment");
                Err(ApplicationError::NotFound(format!(
                    "Secret not found: {key} (env: {env_var})"
                )))
            },
            Err(env::VarError::NotUnicode(_)) => Err(ApplicationError::Configuration(format!(
                "Secret contains invalid UTF-8: {env_var}"
            ))),
        }
    }
}
