//! HTTP route handlers.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::state::AppState;

/// Path of the MCP endpoint.
pub const MCP_PATH: &str = "/mcp";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(MCP_PATH, post(mcp_endpoint))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// JSON-RPC endpoint. Notifications are acknowledged with 202 and no body.
async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    match state.mcp.handle_bytes(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
