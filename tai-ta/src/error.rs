//! Error types for tai-ta
//!
//! API errors serialize as `{"detail": "..."}`, the body shape the
//! frontend expects on any non-success status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::{ClassifierError, GeologyError};
use crate::validators::UploadError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload exceeds the size cap (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Classifier unavailable and synthetic fallback disabled (503)
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Remote geology service hard failure (502)
    #[error("Upstream service error: {0}")]
    Upstream(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// tai-common error
    #[error("Common error: {0}")]
    Common(#[from] tai_common::Error),
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotAnImage => ApiError::BadRequest(err.to_string()),
            UploadError::TooLarge => ApiError::PayloadTooLarge(err.to_string()),
        }
    }
}

impl From<GeologyError> for ApiError {
    fn from(err: GeologyError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        ApiError::ClassifierUnavailable(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::ClassifierUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Common(ref err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(json!({ "detail": message }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
