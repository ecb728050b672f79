//! Weather agent HTTP presentation layer
//!
//! Exposes the weather tools to agent runtimes, one location context per session.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
