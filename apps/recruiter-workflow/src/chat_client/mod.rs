//! Chat client: the only way this service talks to the chat collaborator.
//!
//! Sessions are opened through `POST {CHAT_URL}/sessions`. Handlers never call
//! the notifier directly; they enqueue onto the `ChatOutbox`, whose worker owns
//! delivery and retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod outbox;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Body of a session-creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSessionRequest {
    pub candidate_id: String,
    pub recruiter_id: String,
}

/// Opens chat sessions. Implement this to swap the transport without touching
/// the workflow or the outbox.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn open_session(&self, request: &ChatSessionRequest) -> Result<(), ChatError>;
}

/// reqwest-backed notifier with a per-call timeout.
#[derive(Clone)]
pub struct HttpChatNotifier {
    client: Client,
    sessions_url: String,
}

impl HttpChatNotifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            sessions_url: format!("{}/sessions", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ChatNotifier for HttpChatNotifier {
    async fn open_session(&self, request: &ChatSessionRequest) -> Result<(), ChatError> {
        let response = self
            .client
            .post(&self.sessions_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            candidate_id = %request.candidate_id,
            recruiter_id = %request.recruiter_id,
            status = status.as_u16(),
            "Chat session opened"
        );
        Ok(())
    }
}
