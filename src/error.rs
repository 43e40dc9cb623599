//! Error handling for Focus Timer
//!
//! Errors surfaced over HTTP. Timer commands themselves cannot fail; what
//! can go wrong is reading the session log and malformed requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::logging::log_error;
use crate::services::session_log::SessionLogError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Session log error: {0}")]
    SessionLog(#[from] SessionLogError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SessionLog(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::SessionLog(_) => "SessionLogError",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
        }
    }

    /// Check if this error should be logged as an error vs warning
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    pub fn bad_request(message: &str) -> Self {
        AppError::BadRequest(message.to_string())
    }

    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(format!("{resource} not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if self.is_server_error() {
            log_error(&message, self.error_code());
        } else {
            tracing::warn!(error = %message, "Request rejected");
        }

        let body = Json(json!({
            "error": self.error_code(),
            "message": message,
            "timestamp": chrono::Utc::now().timestamp(),
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
