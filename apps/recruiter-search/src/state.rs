use std::sync::Arc;

use crate::config::Config;
use crate::index::store::CandidateIndex;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Live candidate index. Pushed to by candidate-profile, read by recruiter queries.
    pub index: Arc<CandidateIndex>,
    pub config: Config,
}
