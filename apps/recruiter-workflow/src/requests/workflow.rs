//! Interview request state machine.
//!
//! pending ──respond──▶ confirmed | rejected | no_response
//!
//! All three targets are terminal. Confirmation enqueues a chat-session
//! notification once the new status is stored; the caller never waits on it.
//! `expires_at` is recorded but not enforced.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat_client::outbox::ChatOutbox;
use crate::chat_client::ChatSessionRequest;
use crate::requests::models::{InterviewRequest, RequestStatus, ResponseStatus};
use crate::requests::store::{RequestStore, Resolution};

/// Substituted when a caller asks for zero or negative days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Interview request {0} not found")]
    NotFound(String),

    #[error("Interview request {id} was already answered with '{current}'")]
    AlreadyResolved { id: String, current: RequestStatus },
}

pub struct RequestWorkflow {
    store: RequestStore,
    /// `None` when no chat service is configured; confirmations then skip the notification.
    chat: Option<ChatOutbox>,
}

impl RequestWorkflow {
    pub fn new(chat: Option<ChatOutbox>) -> Self {
        Self {
            store: RequestStore::new(),
            chat,
        }
    }

    pub async fn create(
        &self,
        recruiter_id: String,
        candidate_id: String,
        expires_in_days: i64,
    ) -> InterviewRequest {
        let request = new_request(recruiter_id, candidate_id, expires_in_days, Utc::now());
        info!(
            request_id = %request.id,
            recruiter_id = %request.recruiter_id,
            candidate_id = %request.candidate_id,
            expires_at = %request.expires_at,
            "Interview request created"
        );
        self.store.insert(request).await
    }

    pub async fn get(&self, id: &str) -> Result<InterviewRequest, WorkflowError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| WorkflowError::NotFound(id.to_string()))
    }

    /// Apply a candidate's answer. The returned request reflects the stored state.
    pub async fn respond(
        &self,
        id: &str,
        status: ResponseStatus,
    ) -> Result<InterviewRequest, WorkflowError> {
        match self.store.resolve(id, status, Utc::now()).await? {
            Resolution::Unchanged(request) => {
                debug!(request_id = %id, status = %request.status, "Repeated response ignored");
                Ok(request)
            }
            Resolution::Transitioned(request) => {
                info!(request_id = %id, status = %request.status, "Interview request answered");
                if request.status == RequestStatus::Confirmed {
                    self.notify_chat(&request);
                }
                Ok(request)
            }
        }
    }

    fn notify_chat(&self, request: &InterviewRequest) {
        let Some(outbox) = &self.chat else {
            debug!(request_id = %request.id, "No chat service configured, skipping session");
            return;
        };
        outbox.enqueue(ChatSessionRequest {
            candidate_id: request.candidate_id.clone(),
            recruiter_id: request.recruiter_id.clone(),
        });
    }
}

/// Days until expiry, with the default substituted for non-positive input.
fn effective_expiry_days(requested: i64) -> i64 {
    if requested <= 0 {
        DEFAULT_EXPIRY_DAYS
    } else {
        requested
    }
}

fn new_request(
    recruiter_id: String,
    candidate_id: String,
    expires_in_days: i64,
    now: DateTime<Utc>,
) -> InterviewRequest {
    let expires_at = Duration::try_days(effective_expiry_days(expires_in_days))
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    InterviewRequest {
        id: format!("req-{}", Uuid::new_v4()),
        recruiter_id,
        candidate_id,
        status: RequestStatus::Pending,
        created_at: now,
        expires_at,
        responded_at: None,
    }
}
