use std::sync::Arc;

use crate::config::Config;
use crate::requests::workflow::RequestWorkflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<RequestWorkflow>,
    pub config: Config,
}
