//! Routing service port
//!
//! Computes the road distance between two resolved points. The travel
//! profile is fixed (car) regardless of the shipment's transport mode.

use async_trait::async_trait;
use domain::{Distance, GeoPoint};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Failure outcomes of a routing request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The service returned zero paths between the points
    #[error("No route found between the given points")]
    NoRoute,

    /// Network, status, or payload failure
    #[error("Routing transport error: {0}")]
    Transport(String),
}

/// Port for route distance lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Road distance of the first path from `origin` to `destination`
    ///
    /// Exactly one outbound request per call; no caching, no retries.
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Distance, RoutingError>;
}
