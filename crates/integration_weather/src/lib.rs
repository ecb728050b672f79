//! Open-Meteo integration
//!
//! Clients for the Open-Meteo Geocoding API and the current-conditions part
//! of the Forecast API (<https://open-meteo.com>). Neither requires an API key.

pub mod client;
pub mod geocoding;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use geocoding::{GeocodingClient, GeocodingConfig, GeocodingError, OpenMeteoGeocodingClient};
pub use models::{CURRENT_FIELDS, CurrentObservation, GeocodingResult};
