//! Shared HTTP plumbing for the GraphHopper endpoints

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::GraphHopperConfig;
use crate::error::GraphHopperError;
use crate::models::ErrorBody;

/// GraphHopper API client
///
/// Implements both [`GeocodingClient`](crate::GeocodingClient) and
/// [`RoutingClient`](crate::RoutingClient). One outbound request per call,
/// no caching and no retries.
#[derive(Debug)]
pub struct GraphHopperClient {
    client: Client,
    config: GraphHopperConfig,
    base_url: Url,
}

impl GraphHopperClient {
    /// Create a new GraphHopper client
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid (missing
    /// API key, bad base URL) or `ConnectionFailed` if the HTTP client cannot
    /// be initialized.
    pub fn new(config: &GraphHopperConfig) -> Result<Self, GraphHopperError> {
        config
            .validate()
            .map_err(GraphHopperError::ConfigurationError)?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GraphHopperError::ConfigurationError(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(GraphHopperError::ConfigurationError(format!(
                "base_url cannot carry endpoint paths: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("CarbonTrace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GraphHopperError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            base_url,
        })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GraphHopperConfig {
        &self.config
    }

    /// Absolute URL of an endpoint below the base URL
    pub(crate) fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }

    /// Issue a GET with the API key appended and decode the JSON body
    #[instrument(skip(self, params))]
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, GraphHopperError> {
        let api_key = self.config.api_key().ok_or_else(|| {
            GraphHopperError::ConfigurationError("GraphHopper API key is required".to_string())
        })?;

        let response = self
            .client
            .get(self.endpoint(endpoint))
            .query(params)
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|e| {
                // the request URL carries the API key
                let e = e.without_url();
                if e.is_timeout() {
                    GraphHopperError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else if e.is_connect() {
                    GraphHopperError::ConnectionFailed(e.to_string())
                } else {
                    GraphHopperError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        debug!(status = %status, "Received GraphHopper response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());

            return Err(GraphHopperError::RateLimitExceeded {
                retry_after_secs: retry_after,
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GraphHopperError::Unauthorized(format!(
                "GraphHopper rejected the API key (HTTP {status})"
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(GraphHopperError::RequestFailed(format!(
                "HTTP {status}: {message}"
            )));
        }

        response.json().await.map_err(|e| {
            GraphHopperError::ParseError(e.without_url().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> GraphHopperClient {
        let config = GraphHopperConfig {
            base_url: base_url.to_string(),
            ..GraphHopperConfig::for_testing()
        };
        GraphHopperClient::new(&config).unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        let err = GraphHopperClient::new(&GraphHopperConfig::default()).unwrap_err();
        assert!(matches!(err, GraphHopperError::ConfigurationError(_)));
    }

    #[test]
    fn test_new_rejects_opaque_base_url() {
        let config = GraphHopperConfig {
            base_url: "mailto:ops@example.com".to_string(),
            ..GraphHopperConfig::for_testing()
        };
        assert!(matches!(
            GraphHopperClient::new(&config),
            Err(GraphHopperError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_endpoint_appends_segment() {
        let client = client_for("https://graphhopper.com/api/1");
        assert_eq!(
            client.endpoint("geocode").as_str(),
            "https://graphhopper.com/api/1/geocode"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = client_for("http://127.0.0.1:8989/");
        assert_eq!(client.endpoint("route").as_str(), "http://127.0.0.1:8989/route");
    }
}
