//! Raw GraphHopper response payloads
//!
//! Only the fields CarbonTrace reads are modelled; everything else in the
//! responses is ignored.

use serde::Deserialize;

/// Response of `GET /geocode`
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    /// Candidate matches, best first
    #[serde(default)]
    pub hits: Vec<GeocodeHit>,
}

/// A single geocoding candidate
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeHit {
    /// Coordinates of the match
    pub point: HitPoint,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Coordinates as GraphHopper spells them
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HitPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Response of `GET /route`
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// Alternative paths, best first
    #[serde(default)]
    pub paths: Vec<RoutePath>,
}

/// A single routed path
#[derive(Debug, Clone, Deserialize)]
pub struct RoutePath {
    /// Path length in meters
    pub distance: f64,
    /// Travel time in milliseconds
    #[serde(default)]
    pub time: Option<u64>,
}

/// Error body GraphHopper returns with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    #[serde(default)]
    pub message: Option<String>,
}
