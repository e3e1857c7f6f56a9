//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A WGS84 coordinate pair as returned by the geocoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN is rejected as well).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Format as the `lat,lng` pair used in routing query strings
    #[must_use]
    pub fn to_query_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Great-circle distance to another point in kilometers (Haversine)
    ///
    /// Informational only. Emission estimates always use the routed road
    /// distance.
    #[must_use]
    pub fn great_circle_km(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let point = GeoPoint::new(40.7128, -74.006).expect("valid coordinates");
        assert!((point.latitude() - 40.7128).abs() < f64::EPSILON);
        assert!((point.longitude() - -74.006).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_query_pair() {
        let point = GeoPoint::new(40.7128, -74.006).expect("valid");
        assert_eq!(point.to_query_pair(), "40.7128,-74.006");
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(34.0522, -118.2437).expect("valid");
        let display = format!("{point}");
        assert!(display.contains("34.052200"));
        assert!(display.contains("-118.243700"));
    }

    #[test]
    fn test_great_circle_same_point() {
        let point = GeoPoint::new(52.52, 13.405).expect("valid");
        assert!(point.great_circle_km(&point).abs() < 0.001);
    }

    #[test]
    fn test_great_circle_new_york_los_angeles() {
        let new_york = GeoPoint::new(40.7128, -74.006).expect("valid");
        let los_angeles = GeoPoint::new(34.0522, -118.2437).expect("valid");
        let distance = new_york.great_circle_km(&los_angeles);
        // Roughly 3940 km by air
        assert!((distance - 3936.0).abs() < 50.0);
    }

    #[test]
    fn test_serialization() {
        let point = GeoPoint::new(52.52, 13.405).expect("valid");
        let json = serde_json::to_string(&point).expect("serialize");
        assert!(json.contains("\"latitude\":52.52"));

        let deserialized: GeoPoint = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(point, deserialized);
    }
}
