//! Error taxonomy for the attendance and payroll core.
//!
//! Every operation returns [`AppError`] so callers and handlers deal with one
//! error surface. Storage failures are classified into the taxonomy by vendor
//! error kind; everything unrecognized stays an internal error.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error};
use once_cell::sync::Lazy;
use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::response::ApiResponse;

/// Raw error detail is only exposed outside production mode.
static EXPOSE_ERROR_DETAIL: Lazy<bool> = Lazy::new(|| {
    std::env::var("APP_ENV")
        .map(|env| env != "production")
        .unwrap_or(true)
});

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input, rejected before any storage access.
    #[error("{0}")]
    Validation(String),

    /// The addressed attendance/payroll/detail record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate clock-in/out or a violated unique key.
    #[error("{0}")]
    Conflict(String),

    /// A referenced staff or payroll row is missing.
    #[error("{0}")]
    ForeignKey(String),

    /// Unexpected storage failure, including pool exhaustion.
    #[error("Internal server error")]
    Internal(#[source] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn foreign_key(message: impl Into<String>) -> Self {
        AppError::ForeignKey(message.into())
    }
}

/// True when the storage error is a unique-key violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if matches!(db.kind(), ErrorKind::UniqueViolation))
}

/// True when the storage error is a foreign-key violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if matches!(db.kind(), ErrorKind::ForeignKeyViolation))
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            return AppError::Conflict("A record with the same key already exists".to_string());
        }
        if is_foreign_key_violation(&err) {
            return AppError::ForeignKey("A referenced record does not exist".to_string());
        }
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            other => AppError::Internal(other),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ForeignKey(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            AppError::Internal(source) if *EXPOSE_ERROR_DETAIL => Some(source.to_string()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(self.to_string(), detail))
    }
}

/// Maps body deserialization failures into the standard envelope.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::validation(err.to_string()).into()
}

/// Maps query-string deserialization failures into the standard envelope.
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::validation(err.to_string()).into()
}

/// Maps path-parameter failures into the standard envelope.
pub fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::validation(err.to_string()).into()
}
