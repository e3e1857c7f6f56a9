//! GraphHopper integration for CarbonTrace
//!
//! Provides place geocoding and road-distance routing via the
//! [GraphHopper Directions API](https://graphhopper.com/api/1/docs/).
//!
//! # Architecture
//!
//! [`GeocodingClient`] and [`RoutingClient`] define the two operations; both
//! are implemented by [`GraphHopperClient`], which shares one HTTP client and
//! API key between them.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_graphhopper::{GeocodingClient, GraphHopperClient, GraphHopperConfig, RoutingClient};
//!
//! let config = GraphHopperConfig::default().with_api_key(std::env::var("GRAPHHOPPER_API_KEY")?);
//! let client = GraphHopperClient::new(&config)?;
//!
//! let origin = client.geocode("New York, USA").await?;
//! let destination = client.geocode("Los Angeles, USA").await?;
//! let distance = client.route_distance(&origin, &destination).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;
mod routing;

pub use client::GraphHopperClient;
pub use config::GraphHopperConfig;
pub use error::GraphHopperError;
pub use geocoding::GeocodingClient;
pub use models::{GeocodeHit, GeocodeResponse, HitPoint, RoutePath, RouteResponse};
pub use routing::RoutingClient;
