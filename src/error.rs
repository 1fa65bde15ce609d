//! Common error types for the studio service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Studio session not found: {0}")]
    SessionNotFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Image generation already in progress")]
    GenerationInProgress,

    #[error("No image produced by the model")]
    NoImageProduced,

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response format (OpenAI compatible)
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub code: Option<String>,
}

impl AppError {
    /// Status code and error classification used in HTTP responses
    fn classify(&self) -> (StatusCode, &'static str, Option<&'static str>) {
        match self {
            AppError::Config(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None)
            }
            AppError::HttpClient(_) | AppError::BackendError(_) => {
                (StatusCode::BAD_GATEWAY, "backend_error", None)
            }
            AppError::SessionNotFound(_) => (
                StatusCode::NOT_FOUND,
                "not_found_error",
                Some("session_not_found"),
            ),
            AppError::AuthenticationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "backend_error",
                Some("upstream_authentication_failed"),
            ),
            AppError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limit_error",
                Some("rate_limit_exceeded"),
            ),
            AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", None)
            }
            AppError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "invalid_request_error",
                Some("payload_too_large"),
            ),
            AppError::GenerationInProgress => (
                StatusCode::CONFLICT,
                "conflict_error",
                Some("generation_in_progress"),
            ),
            AppError::NoImageProduced => (
                StatusCode::BAD_GATEWAY,
                "backend_error",
                Some("no_image_produced"),
            ),
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        self.classify().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code) = self.classify();

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.to_string(),
                r#type: error_type.to_string(),
                code: code.map(|c| c.to_string()),
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
