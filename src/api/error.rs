//! HTTP error responses
//!
//! Every failure is rendered as `{"error": <message>, "kind": <kind>}` so
//! clients can tell a bad request from a missing record from a server fault.

use crate::error::CoreError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug)]
pub enum ApiError {
    /// Request failed its schema (400)
    Validation(String),
    /// Target record does not exist (404)
    NotFound(String),
    /// Storage or infrastructure failure (500)
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::Storage(_) => "storage",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Validation(m) | ApiError::NotFound(m) | ApiError::Storage(m) => m,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => ApiError::Validation(msg),
            missing @ CoreError::NotFound(..) => ApiError::NotFound(missing.to_string()),
            other => {
                tracing::error!("Storage failure: {}", other);
                ApiError::Storage(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(serde_json::json!({
                "error": self.message(),
                "kind": self.kind(),
            })),
        )
            .into_response()
    }
}
