//! GraphHopper adapter - Implements GeocodingPort and RoutingPort using integration_graphhopper

use application::error::ApplicationError;
use application::ports::{GeocodingError, GeocodingPort, RoutingError, RoutingPort};
use async_trait::async_trait;
use domain::{Distance, GeoPoint};
use integration_graphhopper::{
    GeocodingClient, GraphHopperClient, GraphHopperConfig, GraphHopperError, RoutingClient,
};
use tracing::{instrument, warn};

/// Adapter for geocoding and routing through GraphHopper
pub struct GraphHopperAdapter {
    client: GraphHopperClient,
}

impl std::fmt::Debug for GraphHopperAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphHopperAdapter")
            .field("base_url", &self.client.config().base_url)
            .field("vehicle", &self.client.config().vehicle)
            .finish_non_exhaustive()
    }
}

impl GraphHopperAdapter {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: GraphHopperClient) -> Self {
        Self { client }
    }

    /// Build the client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid (for example a missing API key).
    pub fn from_config(config: &GraphHopperConfig) -> Result<Self, ApplicationError> {
        let client = GraphHopperClient::new(config).map_err(|e| match e {
            GraphHopperError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::ExternalService(other.to_string()),
        })?;
        Ok(Self::new(client))
    }

    fn map_geocoding_error(err: GraphHopperError) -> GeocodingError {
        match err {
            GraphHopperError::LocationNotFound(place) => GeocodingError::NotFound(place),
            other => GeocodingError::Transport(other.to_string()),
        }
    }

    fn map_routing_error(err: GraphHopperError) -> RoutingError {
        match err {
            GraphHopperError::NoRouteFound { .. } => RoutingError::NoRoute,
            other => RoutingError::Transport(other.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for GraphHopperAdapter {
    #[instrument(skip(self))]
    async fn resolve(&self, place: &str) -> Result<GeoPoint, GeocodingError> {
        self.client.geocode(place).await.map_err(|e| {
            if !e.is_empty_result() {
                warn!(%place, error = %e, "GraphHopper geocoding failed");
            }
            Self::map_geocoding_error(e)
        })
    }
}

#[async_trait]
impl RoutingPort for GraphHopperAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Distance, RoutingError> {
        self.client
            .route_distance(origin, destination)
            .await
            .map_err(|e| {
                if !e.is_empty_result() {
                    warn!(error = %e, "GraphHopper routing failed");
                }
                Self::map_routing_error(e)
            })
    }
}
