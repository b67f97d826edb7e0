pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::requests::handlers;
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
        .route(
            "/requests",
            post(handlers::handle_create).fallback(method_not_allowed),
        )
        .route(
            "/requests/:id",
            get(handlers::handle_get).fallback(method_not_allowed),
        )
        .route(
            "/requests/:id/respond",
            post(handlers::handle_respond).fallback(method_not_allowed),
        )
        .with_state(state)
}
