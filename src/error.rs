//! Error types for the book registry

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message shown when a registration reuses an existing BN ID
pub const DUPLICATE_BN_ID_MESSAGE: &str = "BN ID number already exists!";

/// Numeric error codes carried in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    Duplicate = 8,
    BadValue = 18,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A registration attempt reused a BN ID that is already stored
    #[error("{}", DUPLICATE_BN_ID_MESSAGE)]
    DuplicateKey { bn_id: String },

    /// Any other persistence failure, including a unique violation raised by the database
    #[error("Error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Message shown to the person submitting the registration form
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::DuplicateKey { .. } => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, self.to_string())
            }
            AppError::Storage(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        let err = AppError::DuplicateKey { bn_id: "BN001".to_string() };
        assert_eq!(err.user_message(), "BN ID number already exists!");
    }

    #[test]
    fn test_storage_message_carries_cause() {
        let err = AppError::Storage(sqlx::Error::RowNotFound);
        assert!(err.user_message().starts_with("Error: "));
        assert!(err.user_message().contains(&sqlx::Error::RowNotFound.to_string()));
    }

    #[test]
    fn test_status_codes() {
        let dup = AppError::DuplicateKey { bn_id: "x".to_string() }.into_response();
        assert_eq!(dup.status(), StatusCode::CONFLICT);

        let bad = AppError::Validation("Title is required".to_string()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let db = AppError::Storage(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
