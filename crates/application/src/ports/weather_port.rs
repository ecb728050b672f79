//! Weather service port
//!
//! Defines the interface for current weather retrieval.

use async_trait::async_trait;
use domain::value_objects::{Coordinates, Measurement, WeatherCode};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Current conditions as reported upstream
///
/// Values keep the provider's number rendering and units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Local observation time
    pub time: String,
    /// IANA timezone of the location
    pub timezone: String,
    /// WMO weather code
    pub weather_code: WeatherCode,
    /// Air temperature
    pub temperature: Measurement,
    /// Apparent (feels like) temperature
    pub apparent_temperature: Measurement,
    /// Relative humidity
    pub humidity: Measurement,
    /// Wind speed
    pub wind_speed: Measurement,
    /// Wind direction
    pub wind_direction: Measurement,
    /// Precipitation amount
    pub precipitation: Measurement,
}

/// Port for weather service operations
#[allow(clippy::struct_field_names)] // automock generates struct with `get_*` prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current conditions at a position
    async fn get_current_conditions(
        &self,
        coordinates: &Coordinates,
    ) -> Result<CurrentConditions, ApplicationError>;
}
