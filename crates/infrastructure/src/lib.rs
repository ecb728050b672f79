//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the Open-Meteo clients and
//! provides configuration loading, telemetry setup and service wiring.

pub mod adapters;
pub mod config;
pub mod telemetry;
mod wiring;

pub use adapters::*;
pub use config::{AppConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
pub use wiring::build_weather_tools;
