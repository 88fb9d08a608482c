//! Response DTOs for the background remover API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for a successful removal
/// (POST /remove-background, POST /api/remove-background)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveBackgroundResponse {
    /// Always true on this path
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
    /// Relative URL where the artifact is served
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    /// Bare artifact file name
    pub filename: String,
}

impl RemoveBackgroundResponse {
    /// Creates a success response for a freshly written artifact.
    pub fn new(file_url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Background removed successfully".to_string(),
            file_url: file_url.into(),
            filename: filename.into(),
        }
    }
}

/// Error response body for all failure conditions.
///
/// Produced by `ApiError::into_response`; defined here so tests and clients
/// have a typed view of the wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always false on this path
    pub success: bool,
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_serialize() {
        let resp = RemoveBackgroundResponse::new("/outputs/cat-1-2-output.png", "cat-1-2-output.png");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""fileUrl":"/outputs/cat-1-2-output.png""#));
        assert!(json.contains(r#""filename":"cat-1-2-output.png""#));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Background removal failed.");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains("Background removal failed."));
    }
}
