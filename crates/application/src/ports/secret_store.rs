//! Port for secret storage and retrieval
//!
//! Service credentials are never compiled in; they are looked up through
//! this port (environment variables today, other backends later).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for secret storage operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    /// Retrieve a secret by its key/path
    ///
    /// # Arguments
    /// * `key` - The key or path to the secret (e.g., "graphhopper/api_key")
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError>;
}
