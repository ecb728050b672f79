//! Display-ready current weather report

use serde::{Deserialize, Serialize};

use crate::value_objects::{Measurement, WeatherCode};

/// Current conditions formatted for display
///
/// Every field is a finished string. A report only exists for a complete
/// upstream observation; there is no partially filled variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeatherReport {
    /// Heading, e.g. `Current Weather at Paris, France`
    pub location: String,
    /// Condition label derived from the WMO code
    pub conditions: String,
    /// e.g. `21.5°C`
    pub temperature: String,
    /// Apparent temperature, e.g. `19.8°C`
    pub feels_like: String,
    /// e.g. `65%`
    pub humidity: String,
    /// e.g. `12.5 km/h from 225°`
    pub wind: String,
    /// e.g. `0.0mm`
    pub precipitation: String,
    /// Observation time with its timezone, e.g. `2024-01-15T12:00 (Europe/Paris)`
    pub data_time: String,
}

/// Inputs for assembling a [`CurrentWeatherReport`]
#[derive(Debug, Clone, Copy)]
pub struct ReportParts<'a> {
    /// Heading for the report
    pub label: &'a str,
    /// Reported WMO code
    pub weather_code: WeatherCode,
    /// Air temperature
    pub temperature: &'a Measurement,
    /// Apparent temperature
    pub apparent_temperature: &'a Measurement,
    /// Relative humidity
    pub humidity: &'a Measurement,
    /// Wind speed
    pub wind_speed: &'a Measurement,
    /// Wind direction
    pub wind_direction: &'a Measurement,
    /// Precipitation amount
    pub precipitation: &'a Measurement,
    /// Observation timestamp as reported
    pub time: &'a str,
    /// Timezone name as reported
    pub timezone: &'a str,
}

impl CurrentWeatherReport {
    /// Assemble a report from its parts
    #[must_use]
    pub fn assemble(parts: &ReportParts<'_>) -> Self {
        Self {
            location: parts.label.to_string(),
            conditions: parts.weather_code.description().to_string(),
            temperature: parts.temperature.compact(),
            feels_like: parts.apparent_temperature.compact(),
            humidity: parts.humidity.compact(),
            wind: format!(
                "{} from {}",
                parts.wind_speed.spaced(),
                parts.wind_direction.compact()
            ),
            precipitation: parts.precipitation.compact(),
            data_time: format!("{} ({})", parts.time, parts.timezone),
        }
    }

    /// Multi-line plain-text rendering
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}\nConditions: {}\nTemperature: {} (feels like {})\nHumidity: {}\nWind: {}\nPrecipitation: {}\nData time: {}",
            self.location,
            self.conditions,
            self.temperature,
            self.feels_like,
            self.humidity,
            self.wind,
            self.precipitation,
            self.data_time
        )
    }
}
