//! Builds the tool set from configuration

use std::sync::Arc;

use application::{ApplicationError, WeatherService, WeatherTools};

use crate::adapters::{GeocodingAdapter, WeatherAdapter};
use crate::config::AppConfig;

/// Build [`WeatherTools`] backed by the Open-Meteo adapters
///
/// # Errors
///
/// Returns `Configuration` if an HTTP client cannot be created.
pub fn build_weather_tools(config: &AppConfig) -> Result<WeatherTools, ApplicationError> {
    let geocoding = GeocodingAdapter::with_config(config.geocoding.clone())?;
    let weather = WeatherAdapter::with_config(config.weather.clone())?;
    let service = WeatherService::new(Arc::new(geocoding), Arc::new(weather));
    Ok(WeatherTools::new(Arc::new(service)))
}
