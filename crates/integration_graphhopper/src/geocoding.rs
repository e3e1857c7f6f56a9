//! GraphHopper geocoding
//!
//! Resolves a free-form place name to the coordinates of the first hit
//! returned by `GET /geocode`.

use async_trait::async_trait;
use domain::GeoPoint;
use tracing::{debug, instrument};

use crate::client::GraphHopperClient;
use crate::error::GraphHopperError;
use crate::models::GeocodeResponse;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form place name to geographic coordinates
    ///
    /// Returns `LocationNotFound` when the service has no match.
    async fn geocode(&self, place: &str) -> Result<GeoPoint, GraphHopperError>;
}

#[async_trait]
impl GeocodingClient for GraphHopperClient {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<GeoPoint, GraphHopperError> {
        let params = [("q", place.to_string()), ("limit", "1".to_string())];

        let response: GeocodeResponse = self.get_json("geocode", &params).await?;

        let hit = response
            .hits
            .first()
            .ok_or_else(|| GraphHopperError::LocationNotFound(place.to_string()))?;

        let point = GeoPoint::new(hit.point.lat, hit.point.lng)
            .map_err(|e| GraphHopperError::ParseError(e.to_string()))?;

        debug!(%place, %point, name = ?hit.name, "Geocoded place");
        Ok(point)
    }
}
