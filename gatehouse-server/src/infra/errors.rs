use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use gatehouse_core::error::AuthError;
use gatehouse_core::user::ValidationError;

pub type AppResult<T> = Result<T, AppError>;

/// HTTP-facing error: a status code and a client-safe message. Internal
/// detail (store errors, hashing failures) is logged at the conversion site
/// and degraded to a generic message here.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Convert from various error types

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateUser => Self::bad_request(err.to_string()),
            AuthError::UserNotFound => Self::not_found(err.to_string()),
            AuthError::InvalidCredentials => Self::bad_request(err.to_string()),
            AuthError::InvalidToken | AuthError::Expired => {
                Self::unauthorized(err.to_string())
            }
            AuthError::StoreUnavailable(ref detail) => {
                tracing::error!(error = %detail, "credential store failure");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "unhandled server error");
        Self::internal("Internal server error")
    }
}
