use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mercato_core::{error_response, HttpError};

/// Security-related errors for JWT validation and authentication.
#[derive(Debug)]
pub enum SecurityError {
    /// The Authorization header is missing from the request.
    MissingAuthHeader,

    /// The authorization scheme is not "Bearer".
    InvalidAuthScheme,

    /// The JWT token is invalid (malformed, bad signature, etc.).
    InvalidToken(String),

    /// The JWT token has expired.
    TokenExpired,

    /// Token validation failed (issuer, audience, or other claim mismatch).
    ValidationFailed(String),

    /// The token could not be signed.
    Signing(String),
}

impl std::fmt::Display for SecurityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityError::MissingAuthHeader => write!(f, "Missing Authorization header"),
            SecurityError::InvalidAuthScheme => write!(f, "Invalid authorization scheme"),
            SecurityError::InvalidToken(msg) => write!(f, "Invalid token: {msg}"),
            SecurityError::TokenExpired => write!(f, "Token expired"),
            SecurityError::ValidationFailed(msg) => write!(f, "Token validation failed: {msg}"),
            SecurityError::Signing(msg) => write!(f, "Token signing failed: {msg}"),
        }
    }
}

impl std::error::Error for SecurityError {}

impl SecurityError {
    /// Clients never learn why a token was rejected.
    pub fn public_message(&self) -> &'static str {
        "Unauthorized"
    }
}

impl IntoResponse for SecurityError {
    fn into_response(self) -> Response {
        error_response(StatusCode::UNAUTHORIZED, self.public_message())
    }
}

impl From<SecurityError> for HttpError {
    fn from(err: SecurityError) -> Self {
        match err {
            SecurityError::Signing(msg) => HttpError::Internal(msg),
            other => HttpError::Unauthorized(other.public_message().to_string()),
        }
    }
}
