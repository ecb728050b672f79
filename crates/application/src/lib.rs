//! Application layer - Use cases and orchestration
//!
//! Contains the geocoding and weather use cases, the session-scoped location
//! state they share, the agent tool boundary, and the port definitions that
//! infrastructure adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
