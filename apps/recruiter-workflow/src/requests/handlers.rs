use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::requests::models::{InterviewRequest, ResponseStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequestBody {
    pub recruiter_id: Option<String>,
    pub candidate_id: Option<String>,
    /// Zero, negative or absent means the default expiry.
    pub expires_in_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RespondBody {
    pub status: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} required")))
}

/// POST /requests
pub async fn handle_create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRequestBody>,
) -> Result<(StatusCode, Json<InterviewRequest>), AppError> {
    let recruiter_id = required(body.recruiter_id, "recruiter_id")?;
    let candidate_id = required(body.candidate_id, "candidate_id")?;

    let expires_in_days = body.expires_in_days.unwrap_or(0);
    if expires_in_days > state.config.max_expiry_days {
        return Err(AppError::Validation(format!(
            "expires_in_days must be at most {}",
            state.config.max_expiry_days
        )));
    }

    let request = state
        .workflow
        .create(recruiter_id, candidate_id, expires_in_days)
        .await;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /requests/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InterviewRequest>, AppError> {
    Ok(Json(state.workflow.get(&id).await?))
}

/// POST /requests/:id/respond
pub async fn handle_respond(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<RespondBody>,
) -> Result<Json<InterviewRequest>, AppError> {
    let status = body
        .status
        .as_deref()
        .unwrap_or_default()
        .parse::<ResponseStatus>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(Json(state.workflow.respond(&id, status).await?))
}
