//! GraphHopper routing
//!
//! Requests the road distance between two points from `GET /route`. Only the
//! length of the first path is used; geometry is not requested.

use async_trait::async_trait;
use domain::{Distance, GeoPoint};
use tracing::{debug, instrument};

use crate::client::GraphHopperClient;
use crate::error::GraphHopperError;
use crate::models::RouteResponse;

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Road distance of the first path from `origin` to `destination`
    ///
    /// Returns `NoRouteFound` when the service answers without paths.
    async fn route_distance(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Distance, GraphHopperError>;
}

#[async_trait]
impl RoutingClient for GraphHopperClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn route_distance(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Distance, GraphHopperError> {
        let params = [
            ("point", origin.to_query_pair()),
            ("point", destination.to_query_pair()),
            ("vehicle", self.config().vehicle.clone()),
            ("calc_points", "false".to_string()),
        ];

        let response: RouteResponse = self.get_json("route", &params).await?;

        let path = response
            .paths
            .first()
            .ok_or_else(|| GraphHopperError::NoRouteFound {
                from: origin.to_query_pair(),
                to: destination.to_query_pair(),
            })?;

        let distance = Distance::from_meters(path.distance)
            .map_err(|e| GraphHopperError::ParseError(e.to_string()))?;

        debug!(%distance, time_ms = ?path.time, "Routed");
        Ok(distance)
    }
}
