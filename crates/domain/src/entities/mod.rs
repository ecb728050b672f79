//! Entities - Domain records assembled by the application layer

mod current_weather_report;

pub use current_weather_report::{CurrentWeatherReport, ReportParts};
