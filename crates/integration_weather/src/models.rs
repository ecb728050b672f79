//! Open-Meteo response models
//!
//! Raw schema structs for the geocoding and forecast endpoints, plus the
//! normalized [`CurrentObservation`] handed to callers.

use domain::value_objects::Measurement;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Fields requested in the `current` block of a forecast call
pub const CURRENT_FIELDS: [&str; 7] = [
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
    "precipitation",
];

/// Current conditions with upstream-reported units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentObservation {
    /// Observation time in local time of the location (ISO 8601, no offset)
    pub time: String,
    /// IANA timezone name resolved by the service
    pub timezone: String,
    /// WMO weather code
    pub weather_code: i64,
    /// Air temperature at 2 m
    pub temperature: Measurement,
    /// Apparent (feels like) temperature
    pub apparent_temperature: Measurement,
    /// Relative humidity at 2 m
    pub relative_humidity: Measurement,
    /// Wind speed at 10 m
    pub wind_speed: Measurement,
    /// Wind direction at 10 m
    pub wind_direction: Measurement,
    /// Precipitation sum of the preceding interval
    pub precipitation: Measurement,
}

impl From<ForecastResponse> for CurrentObservation {
    fn from(response: ForecastResponse) -> Self {
        let ForecastResponse {
            timezone,
            current,
            current_units: units,
        } = response;

        Self {
            time: current.time,
            timezone,
            weather_code: current.weather_code,
            temperature: Measurement::new(current.temperature_2m.to_string(), units.temperature_2m),
            apparent_temperature: Measurement::new(
                current.apparent_temperature.to_string(),
                units.apparent_temperature,
            ),
            relative_humidity: Measurement::new(
                current.relative_humidity_2m.to_string(),
                units.relative_humidity_2m,
            ),
            wind_speed: Measurement::new(current.wind_speed_10m.to_string(), units.wind_speed_10m),
            wind_direction: Measurement::new(
                current.wind_direction_10m.to_string(),
                units.wind_direction_10m,
            ),
            precipitation: Measurement::new(current.precipitation.to_string(), units.precipitation),
        }
    }
}

/// Raw forecast response; every field is required
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastResponse {
    pub timezone: String,
    pub current: CurrentData,
    pub current_units: CurrentUnits,
}

/// Raw `current` block
///
/// Numbers are kept as [`Number`] so they render the way the service sent them.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentData {
    pub time: String,
    pub temperature_2m: Number,
    pub relative_humidity_2m: Number,
    pub apparent_temperature: Number,
    pub weather_code: i64,
    pub wind_speed_10m: Number,
    pub wind_direction_10m: Number,
    pub precipitation: Number,
}

/// Raw `current_units` block
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentUnits {
    pub temperature_2m: String,
    pub relative_humidity_2m: String,
    pub apparent_temperature: String,
    pub wind_speed_10m: String,
    pub wind_direction_10m: String,
    pub precipitation: String,
}

/// Raw geocoding response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodingResponse {
    /// Absent when nothing matched
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

/// One geocoding candidate
///
/// Every field is optional so one incomplete entry does not spoil the whole
/// result list. Callers check the fields of the candidate they pick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    /// Place name
    #[serde(default)]
    pub name: Option<String>,
    /// Country name
    #[serde(default)]
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    #[serde(default)]
    pub country_code: Option<String>,
    /// First-level administrative area
    #[serde(default)]
    pub admin1: Option<String>,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}
