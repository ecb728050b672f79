//! WMO weather interpretation codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WMO weather code as reported by forecast services
///
/// See: <https://open-meteo.com/en/docs> for the code reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(i64);

impl WeatherCode {
    /// Wrap a raw code
    #[must_use]
    pub const fn new(code: i64) -> Self {
        Self(code)
    }

    /// The raw code
    #[must_use]
    pub const fn code(&self) -> i64 {
        self.0
    }

    /// English label for the code; "Unknown" for anything outside the table
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self.0 {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Foggy",
            48 => "Depositing rime fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            56 => "Light freezing drizzle",
            57 => "Dense freezing drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            66 => "Light freezing rain",
            67 => "Heavy freezing rain",
            71 => "Slight snow fall",
            73 => "Moderate snow fall",
            75 => "Heavy snow fall",
            77 => "Snow grains",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with slight hail",
            99 => "Thunderstorm with heavy hail",
            _ => "Unknown",
        }
    }

    /// Whether the code is part of the documented table
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.description() != "Unknown"
    }
}

/// Translate a raw WMO code into its English label
#[must_use]
pub const fn describe(code: i64) -> &'static str {
    WeatherCode::new(code).description()
}

impl From<i64> for WeatherCode {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
