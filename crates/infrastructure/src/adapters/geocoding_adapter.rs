//! Geocoding adapter - Implements GeocodingPort using integration_weather

use application::error::ApplicationError;
use application::ports::{GeocodingPort, PlaceCandidate};
use async_trait::async_trait;
use integration_weather::{
    GeocodingClient, GeocodingConfig, GeocodingError, GeocodingResult, OpenMeteoGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter for place search using the Open-Meteo geocoding API
pub struct GeocodingAdapter {
    client: OpenMeteoGeocodingClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"OpenMeteoGeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(GeocodingConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ParseError(e) => ApplicationError::MalformedResponse(e),
            GeocodingError::EmptyQuery => ApplicationError::InvalidInput(err.to_string()),
            GeocodingError::ConnectionFailed(_)
            | GeocodingError::RequestFailed(_)
            | GeocodingError::ServiceUnavailable(_)
            | GeocodingError::RateLimitExceeded
            | GeocodingError::Timeout => ApplicationError::Upstream(err.to_string()),
        }
    }

    fn map_result(result: GeocodingResult) -> PlaceCandidate {
        PlaceCandidate {
            name: result.name,
            country: result.country,
            country_code: result.country_code,
            region: result.admin1,
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search_places(&self, name: &str) -> Result<Vec<PlaceCandidate>, ApplicationError> {
        let results = self.client.search(name).await.map_err(Self::map_error)?;
        debug!(count = results.len(), "Geocoding candidates received");
        Ok(results.into_iter().map(Self::map_result).collect())
    }
}
