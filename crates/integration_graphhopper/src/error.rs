//! GraphHopper error types

use thiserror::Error;

/// Errors that can occur when talking to GraphHopper
#[derive(Debug, Error)]
pub enum GraphHopperError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be interpreted
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// The API key was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Geocoding returned no hits
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Routing returned no paths
    #[error("No route found from {from} to {to}")]
    NoRouteFound {
        /// Origin as "lat,lng"
        from: String,
        /// Destination as "lat,lng"
        to: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl GraphHopperError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    /// Returns true if the service answered but found nothing
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        matches!(self, Self::LocationNotFound(_) | Self::NoRouteFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GraphHopperError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(GraphHopperError::RequestFailed("HTTP 503".to_string()).is_retryable());
        assert!(GraphHopperError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            GraphHopperError::RateLimitExceeded {
                retry_after_secs: Some(60)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GraphHopperError::ParseError("test".to_string()).is_retryable());
        assert!(!GraphHopperError::Unauthorized("bad key".to_string()).is_retryable());
        assert!(!GraphHopperError::ConfigurationError("test".to_string()).is_retryable());
        assert!(!GraphHopperError::LocationNotFound("Atlantis".to_string()).is_retryable());
    }

    #[test]
    fn test_empty_results() {
        assert!(GraphHopperError::LocationNotFound("x".to_string()).is_empty_result());
        assert!(
            GraphHopperError::NoRouteFound {
                from: "0,0".to_string(),
                to: "1,1".to_string(),
            }
            .is_empty_result()
        );
        assert!(!GraphHopperError::Timeout { timeout_secs: 1 }.is_empty_result());
    }

    #[test]
    fn test_error_display() {
        let err = GraphHopperError::NoRouteFound {
            from: "40.7128,-74.006".to_string(),
            to: "51.5074,-0.1278".to_string(),
        };
        assert!(err.to_string().contains("40.7128,-74.006"));

        let err = GraphHopperError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = GraphHopperError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
