//! Router and shared state.

use crate::backend::SearchBackend;
use crate::error::BACKEND_UNAVAILABLE;
use crate::search::handlers::{handle_landing, handle_search};
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State handed to every request. Cloning only bumps the backend's refcount.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_landing))
        .route("/search", get(handle_search))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `200 ok` when the engine answers its ping handler, `503` otherwise.
pub async fn handle_health(State(state): State<AppState>) -> (StatusCode, String) {
    match state.backend.ping().await {
        Ok(()) => (StatusCode::OK, "ok".to_string()),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, BACKEND_UNAVAILABLE.to_string())
        }
    }
}
