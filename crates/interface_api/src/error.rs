//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use domain_claims::ClaimError;
use domain_lecturer::LecturerError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<Vec<String>>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
                None,
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                details,
            ),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation(e) => ApiError::validation(e.to_string()),
            ClaimError::NotFound(id) => ApiError::NotFound(format!("Claim {} not found", id)),
            ClaimError::Store(e) if e.is_not_found() => ApiError::NotFound(e.to_string()),
            ClaimError::Store(e) => {
                error!(error = %e, "Claim store failure");
                ApiError::Internal("The claim store is unavailable".to_string())
            }
            ClaimError::PaymentOverflow(message) => {
                error!(%message, "Claim payment overflow");
                ApiError::Internal(message)
            }
        }
    }
}

impl From<LecturerError> for ApiError {
    fn from(err: LecturerError) -> Self {
        match err {
            LecturerError::Validation(errors) => ApiError::Validation {
                message: "Lecturer details are invalid".to_string(),
                details: Some(errors),
            },
            LecturerError::NotFound(id) => ApiError::NotFound(format!("Lecturer {} not found", id)),
            LecturerError::DuplicateEmail(email) => {
                ApiError::Conflict(format!("A lecturer with email {} already exists", email))
            }
            LecturerError::Store(PortError::Conflict { message }) => ApiError::Conflict(message),
            LecturerError::Store(e) => {
                error!(error = %e, "Lecturer store failure");
                ApiError::Internal("The lecturer store is unavailable".to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingPermission(capability) => {
                ApiError::Forbidden(format!("Missing permission: {}", capability))
            }
            AuthError::InvalidToken | AuthError::TokenExpired => ApiError::Unauthorized,
        }
    }
}
