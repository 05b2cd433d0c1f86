//! HTTP error mapping

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use hris_core::DomainError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::Domain(DomainError::PhotoTooLarge);
        }
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::Domain(DomainError::PhotoTooLarge);
        }
        ApiError::BadRequest(format!("invalid multipart body: {}", error.body_text()))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Domain(DomainError::from(errors))
    }
}

impl ApiError {
    /// Status code and machine-readable error code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Domain(e) => match e {
                DomainError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
                DomainError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                DomainError::Deleted => (StatusCode::GONE, "DELETED"),
                DomainError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                DomainError::Duplicate(_) | DomainError::DuplicateId(_) => {
                    (StatusCode::CONFLICT, "DUPLICATE")
                }
                DomainError::PhotoTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "PHOTO_TOO_LARGE"),
                DomainError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
                DomainError::UserNotActive => (StatusCode::FORBIDDEN, "USER_NOT_ACTIVE"),
                DomainError::AlreadyCheckedIn => (StatusCode::CONFLICT, "ALREADY_CHECKED_IN"),
                DomainError::NoCheckInToday => (StatusCode::NOT_FOUND, "NO_CHECK_IN_TODAY"),
                DomainError::AlreadyCheckedOut => (StatusCode::CONFLICT, "ALREADY_CHECKED_OUT"),
                DomainError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
                DomainError::PasswordHashError(_)
                | DomainError::TokenError(_)
                | DomainError::StorageError(_)
                | DomainError::DatabaseError(_)
                | DomainError::InternalError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status.is_server_error() && status != StatusCode::GATEWAY_TIMEOUT {
            tracing::error!("Request failed: {}", self);
            "internal server error".to_string()
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
            self.to_string()
        };

        (status, Json(ApiResponse::failure(code, message))).into_response()
    }
}
