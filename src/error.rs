//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::availability::DateError;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    InvalidDate(#[from] DateError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: &'static str,
    pub message: String,
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::NotFound => "not_found",
            AppError::Database(_) => "database",
            AppError::InvalidDate(_) => "invalid_date",
            AppError::Validation(_) => "validation",
            AppError::Pricing(e) => e.error_type(),
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidDate(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Pricing(e) => (e.status_code(), e.to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = ErrorResponse {
            error_type: self.error_type(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (
                AppError::InvalidDate(DateError::Malformed {
                    value: "x".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Validation("bad".to_string()), StatusCode::BAD_REQUEST),
            (
                AppError::Pricing(PricingError::UnknownProperty { property_id: 7 }),
                StatusCode::NOT_FOUND,
            ),
            (AppError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_invalid_date_message() {
        let err = AppError::from(DateError::Malformed {
            value: "2026-99-01".to_string(),
        });
        assert_eq!(err.error_type(), "invalid_date");
        assert!(err.to_string().contains("2026-99-01"));
    }
}
