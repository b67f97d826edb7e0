pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::index::handlers;
use crate::state::AppState;

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/healthz",
            get(health::health_handler).fallback(method_not_allowed),
        )
        .route(
            "/readyz",
            get(health::ready_handler).fallback(method_not_allowed),
        )
        // Pushed by candidate-profile on every profile create/update
        .route(
            "/index",
            post(handlers::handle_upsert).fallback(method_not_allowed),
        )
        .route(
            "/index/:id",
            get(handlers::handle_get_candidate).fallback(method_not_allowed),
        )
        .route(
            "/search",
            post(handlers::handle_search).fallback(method_not_allowed),
        )
        .with_state(state)
}
