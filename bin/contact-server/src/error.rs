//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>` (or a wrapper around it),
//! which implements [`axum::response::IntoResponse`] so errors are
//! automatically converted to a JSON-body HTTP response.
//!
//! **Security note:** unexpected errors (malformed input, database) are logged
//! with full detail but only a generic message is returned to the caller so
//! that SQL or other implementation details never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::validation::FieldErrors;

/// Body text of every 500 response.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// All errors that can occur in the contact-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// One or more request fields broke a validation rule.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The request could not be decoded at all (bad JSON, wrong content type).
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Propagated from the SQLite (or other) store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServerError {
    /// Render the error, reporting the generic 500 text under `failure_key`.
    pub fn into_response_with_key(self, failure_key: &'static str) -> Response {
        match self {
            ServerError::Validation(errors) => {
                debug!(fields = errors.len(), messages = errors.count(), "request failed validation");
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ServerError::Malformed(detail) => {
                error!(error = %detail, "malformed request");
                generic_failure(failure_key)
            }
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                generic_failure(failure_key)
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.into_response_with_key("error")
    }
}

fn generic_failure(key: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ key: GENERIC_FAILURE })),
    )
        .into_response()
}

impl From<FieldErrors> for ServerError {
    fn from(errors: FieldErrors) -> Self {
        ServerError::Validation(errors)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
