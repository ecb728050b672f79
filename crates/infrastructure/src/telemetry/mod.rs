//! Logging setup
//!
//! Installs a `tracing` subscriber with an env filter and either a
//! human-readable or a JSON formatter.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
