/// Unified error types for the consultation video service
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum VideoError {
    /// Malformed caller input (blank room name, bad user id, bad query string)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The subject identity does not exist in the identity store
    #[error("User not found with id: {id}")]
    UserNotFound { id: i64 },

    /// Key material rejected or the signing primitive failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// A presented grant failed verification. Only `verify_grant` raises it;
    /// no route accepts grants, so the 401 mapping is for library callers
    /// that render it themselves.
    #[error("Invalid grant: {0}")]
    InvalidGrant(String),

    /// Missing or invalid process configuration, only raised at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convert VideoError to HTTP response
impl IntoResponse for VideoError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            VideoError::InvalidArgument(_) => (
                StatusCode::BAD_REQUEST,
                "InvalidRequest",
                self.to_string(),
            ),
            VideoError::UserNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "NotFound",
                self.to_string(),
            ),
            VideoError::InvalidGrant(_) => (
                StatusCode::UNAUTHORIZED,
                "InvalidGrant",
                self.to_string(),
            ),
            VideoError::Signing(_)
            | VideoError::Configuration(_)
            | VideoError::Database(_)
            | VideoError::Internal(_)
            | VideoError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for service operations
pub type VideoResult<T> = Result<T, VideoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (VideoError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (VideoError::UserNotFound { id: 1 }, StatusCode::NOT_FOUND),
            (VideoError::InvalidGrant("x".into()), StatusCode::UNAUTHORIZED),
            (VideoError::Signing("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (VideoError::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_message_names_id() {
        let err = VideoError::UserNotFound { id: 999 };
        assert_eq!(err.to_string(), "User not found with id: 999");
    }
}
