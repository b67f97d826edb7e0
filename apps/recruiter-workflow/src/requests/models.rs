use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of an interview request. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
    NoResponse,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Confirmed => "confirmed",
            RequestStatus::Rejected => "rejected",
            RequestStatus::NoResponse => "no_response",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answers a respond call may carry. Always terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Confirmed,
    Rejected,
    NoResponse,
}

impl From<ResponseStatus> for RequestStatus {
    fn from(status: ResponseStatus) -> Self {
        match status {
            ResponseStatus::Confirmed => RequestStatus::Confirmed,
            ResponseStatus::Rejected => RequestStatus::Rejected,
            ResponseStatus::NoResponse => RequestStatus::NoResponse,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid status '{0}' (expected confirmed, rejected or no_response)")]
pub struct InvalidResponseStatus(pub String);

impl FromStr for ResponseStatus {
    type Err = InvalidResponseStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(ResponseStatus::Confirmed),
            "rejected" => Ok(ResponseStatus::Rejected),
            "no_response" => Ok(ResponseStatus::NoResponse),
            _ => Err(InvalidResponseStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRequest {
    pub id: String,
    pub recruiter_id: String,
    pub candidate_id: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    /// Fixed at creation. Informational only: nothing transitions a request when it passes.
    pub expires_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}
