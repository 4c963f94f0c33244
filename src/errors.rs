// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Two classes only. Input errors map to 400, everything that
/// fails downstream (database, filesystem, missing rows or files) maps to 500.
/// The message always carries the raw text of the underlying failure.
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    DatabaseError(String),

    #[error("{0}")]
    StorageError(String),

    /// A row the orchestration depends on does not exist.
    /// Reported as a downstream failure, there is no 404 in this API.
    #[error("{0}")]
    NotFound(String),
}

impl TravelError {
    fn code(&self) -> &'static str {
        match self {
            TravelError::InvalidInput(_) => "INVALID_INPUT",
            TravelError::DatabaseError(_) => "DATABASE_ERROR",
            TravelError::StorageError(_) => "STORAGE_ERROR",
            TravelError::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl From<sqlx::Error> for TravelError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => TravelError::NotFound(e.to_string()),
            other => TravelError::DatabaseError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for TravelError {
    fn from(e: std::io::Error) -> Self {
        TravelError::StorageError(e.to_string())
    }
}

impl From<multer::Error> for TravelError {
    fn from(e: multer::Error) -> Self {
        TravelError::InvalidInput(e.to_string())
    }
}

/// Convert TravelError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for TravelError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            TravelError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TravelError::DatabaseError(_)
            | TravelError::StorageError(_)
            | TravelError::NotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_classes() {
        assert_eq!(
            TravelError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TravelError::NotFound("gone".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            TravelError::StorageError("disk".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_is_downstream() {
        let err: TravelError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, TravelError::NotFound(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn test_error_body_carries_raw_message() {
        let err = TravelError::InvalidInput("invalid character: expected an optional prefix of `urn:uuid:`".into());
        let resp = err.error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["error"]["code"], "INVALID_INPUT");
        assert_eq!(
            value["error"]["message"],
            "invalid character: expected an optional prefix of `urn:uuid:`"
        );
    }
}
