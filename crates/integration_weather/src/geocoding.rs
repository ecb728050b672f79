//! Open-Meteo geocoding client
//!
//! Converts place names to candidate locations using the
//! [Open-Meteo Geocoding API](https://open-meteo.com/en/docs/geocoding-api).
//! Candidate selection is left to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{GeocodingResponse, GeocodingResult};

/// Configuration for the geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of candidates requested per search
    #[serde(default = "default_result_count")]
    pub result_count: u8,

    /// Language for place and country names
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    10
}

const fn default_result_count() -> u8 {
    5
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            result_count: default_result_count(),
            language: default_language(),
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// The query was blank
    #[error("Geocoding query must not be empty")]
    EmptyQuery,

    /// Service is temporarily unavailable
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for places matching `name`, best match first
    ///
    /// An empty vector means nothing matched.
    async fn search(&self, name: &str) -> Result<Vec<GeocodingResult>, GeocodingError>;
}

/// Open-Meteo geocoding client
#[derive(Debug)]
pub struct OpenMeteoGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl OpenMeteoGeocodingClient {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, GeocodingError> {
        Self::new(GeocodingConfig::default())
    }

    fn search_query(&self, name: &str) -> [(&'static str, String); 4] {
        [
            ("name", name.to_string()),
            ("count", self.config.result_count.to_string()),
            ("language", self.config.language.clone()),
            ("format", "json".to_string()),
        ]
    }

    fn map_send_error(err: &reqwest::Error) -> GeocodingError {
        if err.is_timeout() {
            GeocodingError::Timeout
        } else if err.is_connect() {
            GeocodingError::ConnectionFailed(err.to_string())
        } else {
            GeocodingError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl GeocodingClient for OpenMeteoGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str) -> Result<Vec<GeocodingResult>, GeocodingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }

        let url = format!("{}/search", self.config.base_url);
        debug!(%name, url = %url, "Geocoding place name");

        let response = self
            .client
            .get(&url)
            .query(&self.search_query(name))
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeocodingError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let parsed: GeocodingResponse =
            serde_json::from_str(&body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let results = parsed.results.unwrap_or_default();
        debug!(%name, candidates = results.len(), "Geocoding finished");
        Ok(results)
    }
}
