use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::index::models::{CandidateIndexEntry, ReadinessStatus};
use crate::index::search::{SearchQuery, SearchResult};
use crate::state::AppState;

/// Body pushed by candidate-profile. Absent or null fields fall back to empty values.
#[derive(Debug, Deserialize)]
pub struct IndexCandidateRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub skills: Option<Vec<String>>,
    pub readiness_status: Option<String>,
}

impl IndexCandidateRequest {
    fn into_entry(self) -> Result<CandidateIndexEntry, AppError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Validation("id required".to_string()))?;

        // candidate-profile defaults unset readiness to unverified; mirror that here.
        let readiness_status = match self.readiness_status.as_deref().map(str::trim) {
            None | Some("") => ReadinessStatus::Unverified,
            Some(raw) => raw
                .parse::<ReadinessStatus>()
                .map_err(|e| AppError::Validation(e.to_string()))?,
        };

        Ok(CandidateIndexEntry {
            id,
            name: self.name.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            readiness_status,
        })
    }
}

/// Recruiter query. Every field is optional.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub skills: Option<Vec<String>>,
    pub readiness_status: Option<String>,
    pub minimum_score: Option<i64>,
}

impl SearchRequest {
    fn into_query(self) -> Result<SearchQuery, AppError> {
        let readiness = match self.readiness_status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<ReadinessStatus>()
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            ),
        };

        Ok(SearchQuery {
            skills: self.skills.unwrap_or_default(),
            readiness,
            // Negative floors behave like zero: no floor at all.
            minimum_score: usize::try_from(self.minimum_score.unwrap_or(0).max(0))
                .unwrap_or(usize::MAX),
        })
    }
}

/// POST /index
pub async fn handle_upsert(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<IndexCandidateRequest>,
) -> Result<StatusCode, AppError> {
    let entry = req.into_entry()?;
    let candidate_id = entry.id.clone();
    let readiness = entry.readiness_status;

    let replaced = state.index.upsert(entry).await;
    info!(%candidate_id, %readiness, replaced, "Candidate indexed");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /index/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateIndexEntry>, AppError> {
    state
        .index
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not indexed")))
}

/// POST /search
pub async fn handle_search(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> Result<Json<Vec<SearchResult>>, AppError> {
    let query = req.into_query()?;

    let results = state.index.search(&query).await;
    debug!(
        skills = query.skills.len(),
        readiness = ?query.readiness,
        minimum_score = query.minimum_score,
        matched = results.len(),
        "Search complete"
    );

    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_request(minimum_score: Option<i64>) -> SearchRequest {
        SearchRequest {
            skills: None,
            readiness_status: None,
            minimum_score,
        }
    }

    #[test]
    fn test_negative_minimum_score_is_no_floor() {
        let query = search_request(Some(-5)).into_query().unwrap();
        assert_eq!(query.minimum_score, 0);
    }

    #[test]
    fn test_huge_minimum_score_saturates() {
        let query = search_request(Some(i64::MAX)).into_query().unwrap();
        assert_eq!(query.minimum_score, usize::try_from(i64::MAX).unwrap_or(usize::MAX));
        assert!(query.minimum_score > 0);
    }

    #[test]
    fn test_unknown_readiness_filter_is_rejected() {
        let mut req = search_request(None);
        req.readiness_status = Some("maybe".to_string());
        assert!(matches!(req.into_query(), Err(AppError::Validation(_))));
    }
}
