use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::validation::ValidationErrorResponse;

/// Boxed error used by service entry points and startup code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Helper to create a JSON error response with a standard `{ "error": message }` body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Error returned by every Mercato handler and service method.
#[derive(Debug)]
pub enum HttpError {
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    Conflict(String),
    PayloadTooLarge(String),
    /// An upstream service could not be reached or failed.
    ServiceUnavailable(String),
    BadGateway(String),
    Internal(String),
    Validation(ValidationErrorResponse),
    Custom {
        status: StatusCode,
        body: serde_json::Value,
    },
}

impl HttpError {
    /// Rebuild an error from a status code and message, e.g. when relaying an
    /// upstream response.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::NOT_FOUND => HttpError::NotFound(message),
            StatusCode::UNAUTHORIZED => HttpError::Unauthorized(message),
            StatusCode::FORBIDDEN => HttpError::Forbidden(message),
            StatusCode::BAD_REQUEST => HttpError::BadRequest(message),
            StatusCode::CONFLICT => HttpError::Conflict(message),
            StatusCode::PAYLOAD_TOO_LARGE => HttpError::PayloadTooLarge(message),
            StatusCode::SERVICE_UNAVAILABLE => HttpError::ServiceUnavailable(message),
            StatusCode::BAD_GATEWAY => HttpError::BadGateway(message),
            StatusCode::INTERNAL_SERVER_ERROR => HttpError::Internal(message),
            other => HttpError::Custom {
                status: other,
                body: serde_json::json!({ "error": message }),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::BadRequest(_) | HttpError::Validation(_) => StatusCode::BAD_REQUEST,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Custom { status, .. } => *status,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HttpError::NotFound(_))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            HttpError::Validation(resp) => {
                let body = serde_json::json!({
                    "error": "Validation failed",
                    "details": resp.errors,
                });
                (status, Json(body)).into_response()
            }
            HttpError::Custom { body, .. } => (status, Json(body)).into_response(),
            HttpError::NotFound(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::BadRequest(msg)
            | HttpError::Conflict(msg)
            | HttpError::PayloadTooLarge(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::BadGateway(msg)
            | HttpError::Internal(msg) => error_response(status, msg),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not found: {msg}"),
            HttpError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            HttpError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            HttpError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            HttpError::PayloadTooLarge(msg) => write!(f, "Payload too large: {msg}"),
            HttpError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
            HttpError::BadGateway(msg) => write!(f, "Bad gateway: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal error: {msg}"),
            HttpError::Validation(resp) => {
                write!(f, "Validation failed: {} field error(s)", resp.errors.len())
            }
            HttpError::Custom { status, body } => write!(f, "HTTP {status}: {body}"),
        }
    }
}

impl std::error::Error for HttpError {}
