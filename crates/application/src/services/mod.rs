//! Application services - Use case implementations

mod location_context;
mod session_registry;
mod weather_service;
mod weather_tools;

pub use location_context::LocationContext;
pub use session_registry::{DEFAULT_MAX_SESSIONS, SessionRegistry};
pub use weather_service::{WeatherService, select_candidate};
pub use weather_tools::{
    GET_COORDS_BY_CITY, GET_CURRENT_WEATHER_BY_COORDS, ToolDefinition, ToolOutput, WeatherTools,
};
