//! Route definitions

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use tracing::warn;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Tool discovery
        .route("/v1/tools", get(handlers::tools::list_tools))
        // Sessions
        .route("/v1/sessions", post(handlers::sessions::create_session))
        .route(
            "/v1/sessions/{session_id}",
            delete(handlers::sessions::end_session),
        )
        .route(
            "/v1/sessions/{session_id}/tools/{tool_name}",
            post(handlers::sessions::invoke_tool),
        )
        // Attach state
        .with_state(state)
}

/// Parse configured CORS origins, skipping and logging any that are not valid header values
pub fn parse_allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect()
}
