//! Application state shared across handlers

use std::sync::Arc;

use application::{SessionRegistry, WeatherTools};
use infrastructure::ServerConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Weather tools invoked by agents
    pub tools: Arc<WeatherTools>,
    /// Live sessions and their location contexts
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Create state with an empty session registry sized from `server`
    pub fn new(tools: WeatherTools, server: &ServerConfig) -> Self {
        Self {
            tools: Arc::new(tools),
            sessions: Arc::new(SessionRegistry::with_capacity(server.max_sessions)),
        }
    }
}
