//! HTTP error responses
//!
//! Validation and routing errors use this envelope; assistant
//! processing failures are returned in-band as `{ success: false, ... }`
//! so the editor shows them inline instead of treating them as
//! transport errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Error body for 4xx/5xx responses
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// Machine-readable error summary
    pub error: String,
    /// User-facing message
    pub message: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl HttpError {
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "Endpoint not found".to_string(),
            message: message.into(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "Internal server error".to_string(),
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
