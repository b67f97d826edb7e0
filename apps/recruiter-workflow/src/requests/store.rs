use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::requests::models::{InterviewRequest, RequestStatus, ResponseStatus};
use crate::requests::workflow::WorkflowError;

/// Outcome of applying a response to a stored request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The request left `pending` with this call.
    Transitioned(InterviewRequest),
    /// The request already carried the same terminal status; nothing changed.
    Unchanged(InterviewRequest),
}

/// In-memory interview requests keyed by request id.
///
/// A single `RwLock` guards the map. Lookups share the read guard; inserts and
/// responses hold the write guard for the whole check-and-set.
pub struct RequestStore {
    requests: RwLock<HashMap<String, InterviewRequest>>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, request: InterviewRequest) -> InterviewRequest {
        self.requests
            .write()
            .await
            .insert(request.id.clone(), request.clone());
        request
    }

    pub async fn get(&self, id: &str) -> Option<InterviewRequest> {
        self.requests.read().await.get(id).cloned()
    }

    /// Move a pending request to `status`.
    ///
    /// Repeating the status a request already holds is a no-op; any other
    /// change to a terminal request fails with `AlreadyResolved`.
    pub async fn resolve(
        &self,
        id: &str,
        status: ResponseStatus,
        at: DateTime<Utc>,
    ) -> Result<Resolution, WorkflowError> {
        let mut requests = self.requests.write().await;
        let request = requests
            .get_mut(id)
            .ok_or_else(|| WorkflowError::NotFound(id.to_string()))?;

        let target = RequestStatus::from(status);
        if request.status.is_terminal() {
            if request.status == target {
                return Ok(Resolution::Unchanged(request.clone()));
            }
            return Err(WorkflowError::AlreadyResolved {
                id: id.to_string(),
                current: request.status,
            });
        }

        request.status = target;
        request.responded_at = Some(at);
        Ok(Resolution::Transitioned(request.clone()))
    }
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}
