//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Webhook pipeline failures and invalid input. 400.
    BadRequest(String),
    /// Credential failures. 401.
    Unauthorized(String),
    /// Duplicate signup. 409.
    Conflict(String),
    /// Store and external-API failures. 500.
    Internal(String),
}

impl From<triage_store::StoreError> for AppError {
    fn from(e: triage_store::StoreError) -> Self {
        match e {
            triage_store::StoreError::DuplicateUser => AppError::Conflict(e.to_string()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m),
            AppError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_user_maps_to_conflict() {
        let err: AppError = triage_store::StoreError::DuplicateUser.into();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
