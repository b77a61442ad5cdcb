//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every error response carries a JSON body with a machine-readable code
//! and a human-readable message. Selections themselves never fail: names
//! that match nothing just produce empty charts, so the only client errors
//! are bodies that cannot be read at all.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, e.g. which part of the body was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        details: Option<serde_json::Value>,
    },
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }

    fn into_details(self) -> Option<serde_json::Value> {
        match self {
            Self::NotFound(_) => None,
            Self::BadRequest { details, .. } => details,
        }
    }
}

/// Every JSON body rejection is a 400, whatever status axum would pick.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let rejection_kind = match &rejection {
            JsonRejection::JsonSyntaxError(_) => "syntax",
            JsonRejection::JsonDataError(_) => "data",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body",
        };
        Self::BadRequest {
            message: rejection.body_text(),
            details: Some(serde_json::json!({ "rejection": rejection_kind })),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::debug!(error = %self, status = status.as_u16(), "request rejected");

        let message = self.to_string();
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.into_details(),
            },
        };

        (status, Json(body)).into_response()
    }
}
