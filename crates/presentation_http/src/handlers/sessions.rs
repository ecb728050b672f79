//! Session and tool invocation handlers

use application::ToolOutput;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use domain::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{error::ApiError, state::AppState};

/// Response for a newly opened session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(raw).map_err(|e| ApiError::BadRequest(format!("invalid session id: {e}")))
}

/// Open a new session
#[instrument(skip(state))]
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let session_id = state.sessions.open_session();
    info!(%session_id, active = state.sessions.len(), "Session created");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// Invoke a tool within a session
///
/// The body is the tool's JSON arguments; an empty body means no arguments.
/// Tool failures are reported in the output with `success: false`.
#[instrument(skip(state, body))]
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path((session_id, tool_name)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ToolOutput>, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let args = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON arguments: {e}")))?
    };

    let ctx = state.sessions.context(session_id);
    let output = state.tools.call(&ctx, &tool_name, args).await;
    debug!(%session_id, tool = %tool_name, success = output.success, "Tool invoked");

    Ok(Json(output))
}

/// End a session and forget its location
#[instrument(skip(state))]
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    if state.sessions.end_session(session_id) {
        info!(%session_id, "Session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("session {session_id}")))
    }
}
