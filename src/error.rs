use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Custom error type for the application
///
/// Upstream and internal failures keep their full detail for logging but are
/// reported to clients with a fixed message, so provider error strings never
/// leak through the API.
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    ServiceUnavailable,
    Upstream(String),
    Internal(String),
}

/// Uniform error envelope returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ServiceUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI API service not available".to_string(),
            ),
            AppError::Upstream(detail) => {
                error!("Completion provider error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI service error".to_string(),
                )
            }
            AppError::Internal(detail) => {
                error!("Internal server error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            success: false,
        });

        (status, body).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;
