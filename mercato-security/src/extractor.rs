use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use mercato_core::HttpError;
use serde::Serialize;
use tracing::warn;

use crate::error::SecurityError;
use crate::headers;
use crate::jwt::Claims;
use crate::roles::{join_roles, parse_roles, Role};

/// Extract the Bearer token from request headers, without validating it.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, SecurityError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(SecurityError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| SecurityError::InvalidAuthScheme)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(SecurityError::InvalidAuthScheme)?;
    if !scheme.eq_ignore_ascii_case("Bearer") || token.trim().is_empty() {
        return Err(SecurityError::InvalidAuthScheme);
    }
    Ok(token.trim())
}

/// The authenticated caller, as forwarded by the gateway.
///
/// Use it as a handler argument to require authentication (401 when the
/// identity headers are missing), or as `Option<CurrentUser>` on endpoints
/// that also serve anonymous callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn new(id: i64, email: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id,
            email: email.into(),
            roles,
        }
    }

    pub fn from_claims(claims: &Claims) -> Result<Self, SecurityError> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| SecurityError::InvalidToken("Non-numeric subject".into()))?;
        Ok(Self::new(id, claims.email.clone(), claims.roles.clone()))
    }

    /// Read the identity headers. `None` when `x-user-id` is absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Result<Self, HttpError>> {
        let raw_id = headers.get(headers::USER_ID)?;
        Some(Self::parse_headers(raw_id, headers))
    }

    fn parse_headers(raw_id: &HeaderValue, headers: &HeaderMap) -> Result<Self, HttpError> {
        let id = raw_id
            .to_str()
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| {
                warn!("Malformed x-user-id header");
                HttpError::Unauthorized("Unauthorized".into())
            })?;
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        Ok(Self::new(id, text(headers::USER_EMAIL), parse_roles(&text(headers::USER_ROLES))))
    }

    /// Write the identity headers, replacing any existing values.
    pub fn write_headers(&self, headers: &mut HeaderMap) {
        let pairs = [
            (headers::USER_ID, self.id.to_string()),
            (headers::USER_EMAIL, self.email.clone()),
            (headers::USER_ROLES, join_roles(&self.roles)),
        ];
        for (name, value) in pairs {
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(name, value);
            }
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn require_role(&self, role: Role) -> Result<(), HttpError> {
        self.require_any_role(&[role])
    }

    pub fn require_any_role(&self, roles: &[Role]) -> Result<(), HttpError> {
        if roles.iter().any(|r| self.has_role(*r)) {
            Ok(())
        } else {
            Err(HttpError::Forbidden("Insufficient role".into()))
        }
    }

    /// Allow the resource owner or an administrator.
    pub fn require_owner_or_admin(&self, owner_id: i64) -> Result<(), HttpError> {
        if self.id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(HttpError::Forbidden("Access denied".into()))
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        CurrentUser::from_headers(&parts.headers).unwrap_or_else(|| {
            warn!(uri = %parts.uri, "Missing identity headers");
            Err(HttpError::Unauthorized("Unauthorized".into()))
        })
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        CurrentUser::from_headers(&parts.headers).transpose()
    }
}
