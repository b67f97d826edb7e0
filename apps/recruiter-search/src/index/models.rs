use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a candidate has been marked interview-ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Verified,
    Unverified,
}

impl ReadinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessStatus::Verified => "verified",
            ReadinessStatus::Unverified => "unverified",
        }
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown readiness status '{0}' (expected 'verified' or 'unverified')")]
pub struct UnknownReadiness(pub String);

impl FromStr for ReadinessStatus {
    type Err = UnknownReadiness;

    /// Case-insensitive, whitespace-tolerant. Accepts the aliases candidate-profile
    /// has historically emitted alongside the canonical values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verified" | "ready" | "interview-ready" => Ok(ReadinessStatus::Verified),
            "unverified" | "not-ready" | "not interview-ready" => Ok(ReadinessStatus::Unverified),
            _ => Err(UnknownReadiness(s.to_string())),
        }
    }
}

/// A searchable candidate summary. At most one per `id`; the latest upsert wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateIndexEntry {
    pub id: String,
    pub name: String,
    /// Kept exactly as pushed: order, duplicates and casing are preserved.
    pub skills: Vec<String>,
    pub readiness_status: ReadinessStatus,
}
