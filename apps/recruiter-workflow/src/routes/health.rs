use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /healthz
/// Liveness check. Reports the configured service name.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.config.service_name
    }))
}

/// GET /readyz
pub async fn ready_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
