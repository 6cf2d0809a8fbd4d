//!
//! # Error Handling
//!
//! This module defines `AppError`, the single error type returned by repositories,
//! services and request handlers.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so a handler returning
//! `Result<_, AppError>` gets the right HTTP status code and a JSON body for free.
//! Infrastructure failures are reported to the caller as an opaque
//! "Internal server error"; their details only go to the server log.
//!
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow plain `?` usage.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned to clients for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// The request could not be understood (HTTP 400).
    BadRequest(String),
    /// The requested entity does not exist (HTTP 404, empty body).
    NotFound(String),
    /// A required field is missing or blank (HTTP 400).
    ValidationError(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the database (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg) => {
                HttpResponse::build(self.status_code()).json(json!({ "error": msg }))
            }
            AppError::NotFound(_) => HttpResponse::NotFound().finish(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                HttpResponse::InternalServerError().json(json!({ "error": INTERNAL_ERROR_MESSAGE }))
            }
        }
    }
}

/// `RowNotFound` becomes `NotFound`; everything else is a `DatabaseError`,
/// including unique-constraint violations.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// The first field message becomes the error text, e.g. "Title is required".
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        for field_errors in errors.field_errors().values() {
            for error in field_errors.iter() {
                if let Some(message) = &error.message {
                    return AppError::ValidationError(message.to_string());
                }
            }
        }
        AppError::ValidationError(errors.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[test]
    fn test_error_statuses() {
        let error = AppError::Unauthorized("Invalid credentials".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::ValidationError("Title is required".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Task not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::DatabaseError("connection refused".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_web::test]
    async fn test_internal_errors_are_opaque() {
        let error = AppError::DatabaseError("password authentication failed for user".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[actix_web::test]
    async fn test_not_found_has_empty_body() {
        let error = AppError::NotFound("Task not found".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_validation_message_is_preserved() {
        let mut field_error = ValidationError::new("required");
        field_error.message = Some(Cow::from("Email is required"));
        let mut errors = ValidationErrors::new();
        errors.add("email", field_error);

        match AppError::from(errors) {
            AppError::ValidationError(msg) => assert_eq!(msg, "Email is required"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
    }
}
