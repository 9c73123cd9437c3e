//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("Course {0} not found")]
    CourseNotFound(Uuid),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("No seats left on course {0}")]
    SeatsExhausted(Uuid),

    #[error("Course {0} is not open for enrollment")]
    CourseNotOpen(Uuid),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Payment provider error")]
    Payment(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Machine-readable error kind for clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::CourseNotFound(_) => "COURSE_NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::SeatsExhausted(_) => "SEATS_EXHAUSTED",
            AppError::CourseNotOpen(_) => "COURSE_NOT_OPEN",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "UPSTREAM_STORE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Payment(_) => "UPSTREAM_PAYMENT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound | AppError::CourseNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::SeatsExhausted(_) | AppError::CourseNotOpen(_) => {
                StatusCode::CONFLICT
            }
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Payment(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => format!("{} already exists", msg),

            // Hide details for internal/security errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Payment(msg) => {
                tracing::error!("Payment provider error: {}", msg);
                "The payment provider could not process the request".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn payment(msg: impl Into<String>) -> Self {
        AppError::Payment(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
    pub fn from_db_unique(err: sea_orm::DbErr, entity: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(entity),
            _ => AppError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let course = Uuid::new_v4();

        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::CourseNotFound(course).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::SeatsExhausted(course).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::CourseNotOpen(course).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::payment("boom").status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Database(sea_orm::DbErr::Custom("down".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_codes_are_machine_readable() {
        assert_eq!(AppError::SeatsExhausted(Uuid::nil()).code(), "SEATS_EXHAUSTED");
        assert_eq!(AppError::conflict("User").code(), "CONFLICT");
        assert_eq!(AppError::payment("x").code(), "UPSTREAM_PAYMENT_ERROR");
    }

    #[test]
    fn test_internal_details_hidden() {
        let msg = AppError::internal("secret stack trace").user_message();
        assert!(!msg.contains("secret"));

        let msg = AppError::payment("sk_live_leak").user_message();
        assert!(!msg.contains("sk_live"));
    }

    #[test]
    fn test_non_unique_db_error_stays_database() {
        let err = AppError::from_db_unique(sea_orm::DbErr::Custom("io".into()), "User");
        assert!(matches!(err, AppError::Database(_)));
    }
}
