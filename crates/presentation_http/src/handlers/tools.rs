//! Tool discovery handler

use application::{ToolDefinition, WeatherTools};
use axum::Json;

/// List the tools an agent can call
pub async fn list_tools() -> Json<Vec<ToolDefinition>> {
    Json(WeatherTools::definitions())
}
