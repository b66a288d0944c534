//! REST API handlers for the routing gateway.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use super::AppState;
use crate::router::RouteError;

// ── Request bodies ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SessionStartBody {
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBody {
    pub message: String,
    pub session_id: String,
}

// ── Handlers ────────────────────────────────────────────────────

/// POST /api/session — start a session and route its first message
pub async fn handle_session_start(
    State(state): State<AppState>,
    Json(body): Json<SessionStartBody>,
) -> impl IntoResponse {
    match state.router.start_session(&body.message).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => route_error_response(&e).into_response(),
    }
}

/// POST /api/query — route one message within a session
pub async fn handle_query(
    State(state): State<AppState>,
    Json(body): Json<QueryBody>,
) -> impl IntoResponse {
    match state.router.query(&body.message, &body.session_id).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => route_error_response(&e).into_response(),
    }
}

/// GET /api/status — registry and session overview
pub async fn handle_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.router.status().await)
}

/// GET /api/sessions/{id}/stats — statistics for one session
pub async fn handle_session_stats(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.router.session_stats(&session_id).await {
        Some(stats) => Json(stats).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("unknown session: {session_id}")})),
        )
            .into_response(),
    }
}

/// DELETE /api/sessions/{id} — drop a session
pub async fn handle_session_clear(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let cleared = state.router.clear_session(&session_id).await;
    Json(serde_json::json!({"status": "ok", "cleared": cleared}))
}

// ── Helpers ─────────────────────────────────────────────────────

/// Only validation errors escape the engine; anything else is a bug, so it
/// maps to 500 rather than being hidden.
fn route_error_response(err: &RouteError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        RouteError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({"error": err.to_string()})))
}
