//! Value Objects - Immutable, identity-less domain primitives

mod distance;
mod geo_point;
mod shipment_request;
mod transport_mode;

pub use distance::Distance;
pub use geo_point::GeoPoint;
pub use shipment_request::{RouteQuery, ShipmentRequest};
pub use transport_mode::TransportMode;
