//! Error types.
//!
//! `BackendError` covers everything that can go wrong talking to Solr.
//! `AppError` is what handlers return; it knows how to turn itself into an
//! HTML response with the right status code.

use crate::search::render::render_error_page;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Failures of the search engine client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The configured core URL could not be parsed.
    #[error("invalid search engine URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection failure, timeout, or an interrupted body.
    #[error("search engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("search engine returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The engine answered 2xx but the body was not a `select` response.
    #[error("malformed search engine response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request parameters out of range. Raised before Solr is contacted.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Shown to clients in place of backend details, which stay in the logs.
pub const BACKEND_UNAVAILABLE: &str = "search engine unavailable";

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Text safe to put in a response body. Backend errors carry engine URLs
    /// and raw engine messages, so they are replaced by a fixed message.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Backend(_) => BACKEND_UNAVAILABLE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Html(render_error_page(status, &self.public_message()))).into_response()
    }
}
