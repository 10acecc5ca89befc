use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Body returned for every authentication failure, whatever the cause
pub const NOT_AUTHORIZED_MESSAGE: &str = "Not Authorized.";

/// Application error type
///
/// Domain errors raised by the movie gateway surface to clients as 400,
/// authentication failures as 401. Startup failures never reach a client and
/// stay `anyhow` errors.
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Domain Errors =====
    #[error("{0}")]
    Validation(String),

    #[error("Movie with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Movie not found")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    // ===== Authentication Errors =====
    /// The payload is the concrete cause; it is logged, never returned.
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_)
            | AppError::DuplicateId(_)
            | AppError::NotFound(_)
            | AppError::Store(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get a user-facing error message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth(_) => NOT_AUTHORIZED_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }

    /// Get error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DuplicateId(_) => "DUPLICATE_ID",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Auth(_) => "AUTH_ERROR",
        }
    }

    /// Log this error with appropriate level and context
    pub fn log(&self) {
        let code = self.error_code();

        match self {
            AppError::Auth(_) => {
                tracing::warn!(error = %self, error_code = %code, "Authentication failed");
            }
            AppError::Store(_) => {
                tracing::warn!(error = %self, error_code = %code, "Store operation failed");
            }
            _ => {
                tracing::debug!(error = %self, error_code = %code, "Client error occurred");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let status = self.status_code();
        let body = json!({
            "message": self.user_message(),
            "error_code": self.error_code(),
        });

        (status, axum::Json(body)).into_response()
    }
}

// ============================================================================
// Helper functions for creating common errors
// ============================================================================

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        AppError::Auth(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        AppError::Store(msg.into())
    }
}
