//! Geocoding service port
//!
//! Resolves a free-text place name to coordinates. Adapters in the
//! infrastructure layer implement this port using a geocoding API.

use async_trait::async_trait;
use domain::GeoPoint;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Failure outcomes of a geocoding lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    /// The service returned zero candidates for the place
    #[error("No match found for '{0}'")]
    NotFound(String),

    /// Network, status, or payload failure
    #[error("Geocoding transport error: {0}")]
    Transport(String),
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a place name to the coordinates of its first match
    ///
    /// Exactly one outbound request per call; no caching, no retries.
    async fn resolve(&self, place: &str) -> Result<GeoPoint, GeocodingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }

    #[test]
    fn error_display() {
        let err = GeocodingError::NotFound("Atlantis".to_string());
        assert_eq!(err.to_string(), "No match found for 'Atlantis'");

        let err = GeocodingError::Transport("HTTP 500".to_string());
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn mock_resolves_point() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_resolve()
            .withf(|place: &str| place == "Berlin")
            .returning(|_| Ok(GeoPoint::new(52.52, 13.405).unwrap()));

        let point = mock.resolve("Berlin").await.unwrap();
        assert!((point.latitude() - 52.52).abs() < f64::EPSILON);
    }
}
