//! Error types for the background remover service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Api Error Enum ==
/// Unified error type for request handling.
///
/// Only client-input and processing failures are user-visible; housekeeping
/// failures (sweeps, bulk clears, benign delete races) are logged at the call
/// site and never become an `ApiError`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The multipart request carried no `image` field
    #[error("No file uploaded.")]
    MissingFile,

    /// The uploaded file declared a media type outside the allow-list
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The multipart body could not be read
    #[error("Invalid multipart request: {0}")]
    Multipart(String),

    /// The external background-removal operation failed.
    /// The underlying cause is logged, never returned to the caller.
    #[error("Background removal failed.")]
    Processing,

    /// Filesystem failure on the request path (upload persist, artifact write)
    #[error("Internal error: {0}")]
    Io(#[from] std::io::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }
            ApiError::Multipart(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Processing => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            // Detail stays in the logs, the client gets a generic message
            ApiError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.".to_string(),
            ),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
