//! HTTP error responses.
//!
//! Every failure leaves the server as `{statusCode, message}` JSON. Library
//! errors are mapped by kind; anything unexpected becomes a 500 whose detail is
//! only logged.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Uniform rejection for missing, malformed, expired, revoked or forged sessions.
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<devlog::Error> for ApiError {
    fn from(err: devlog::Error) -> Self {
        if err.is_authentication_error() {
            Self::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
        } else if err.is_read_denied() {
            Self::new(
                StatusCode::UNAUTHORIZED,
                "Journal entry not found or not shared",
            )
        } else if err.is_permission_denied() {
            Self::new(StatusCode::FORBIDDEN, err.to_string())
        } else if err.is_conflict() {
            Self::new(StatusCode::CONFLICT, "Email already exists")
        } else if err.is_not_found() {
            Self::new(StatusCode::NOT_FOUND, err.to_string())
        } else if err.is_invalid_input() {
            Self::bad_request(err.to_string())
        } else {
            tracing::error!(
                module = err.module(),
                kind = failure_kind(&err),
                error = %err,
                "Request failed"
            );
            Self::internal()
        }
    }
}

/// Coarse class of a server-side failure, for the log line only.
fn failure_kind(err: &devlog::Error) -> &'static str {
    if err.is_configuration_error() {
        "configuration"
    } else if err.is_integrity_error() {
        "integrity"
    } else if err.is_io_error() {
        "io"
    } else if err.is_database_error() {
        "database"
    } else {
        "internal"
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}
