//! Domain error types for the balance service.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

/// Application-level errors.
///
/// Every request-scoped failure maps to a client error carrying a single
/// `{ "error": <message> }` body. The lookup endpoint distinguishes an
/// unknown account with 404; all other failures are 400.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed during a request
    #[error("{0}")]
    Database(String),

    /// Resource not found (lookup endpoint)
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid or missing input data
    #[error("{0}")]
    InvalidInput(String),

    /// Mutation would drive the balance negative
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Balance transaction rolled back (mutation endpoint)
    #[error("{0}")]
    Transaction(String),
}

impl AppError {
    /// Validation error for a missing, null, or zero `userId`/`amount`.
    pub fn missing_fields() -> Self {
        AppError::InvalidInput("userId and amount are required".to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::InvalidInput(_)
            | AppError::InsufficientFunds
            | AppError::Transaction(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Database(msg) = self {
            tracing::error!("Database error: {}", msg);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Error response body: one human-readable message.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
