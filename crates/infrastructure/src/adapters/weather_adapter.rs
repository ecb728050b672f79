//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::{CurrentConditions, WeatherPort};
use async_trait::async_trait;
use domain::value_objects::{Coordinates, WeatherCode};
use integration_weather::{
    CurrentObservation, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for current weather using the Open-Meteo forecast API
pub struct WeatherAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ParseError(e) => ApplicationError::MalformedResponse(e),
            WeatherError::InvalidCoordinates => ApplicationError::InvalidInput(err.to_string()),
            WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::ServiceUnavailable(_)
            | WeatherError::Timeout
            | WeatherError::RateLimitExceeded => ApplicationError::Upstream(err.to_string()),
        }
    }

    /// Convert an integration observation into port conditions
    fn map_observation(observation: CurrentObservation) -> CurrentConditions {
        CurrentConditions {
            time: observation.time,
            timezone: observation.timezone,
            weather_code: WeatherCode::new(observation.weather_code),
            temperature: observation.temperature,
            apparent_temperature: observation.apparent_temperature,
            humidity: observation.relative_humidity,
            wind_speed: observation.wind_speed,
            wind_direction: observation.wind_direction,
            precipitation: observation.precipitation,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = coordinates.latitude(), lon = coordinates.longitude()))]
    async fn get_current_conditions(
        &self,
        coordinates: &Coordinates,
    ) -> Result<CurrentConditions, ApplicationError> {
        let result = self
            .client
            .get_current(coordinates.latitude(), coordinates.longitude())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(observation) => {
                debug!(
                    weather_code = observation.weather_code,
                    temperature = %observation.temperature,
                    "Retrieved current weather"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current weather");
            },
        }

        result.map(Self::map_observation)
    }
}
