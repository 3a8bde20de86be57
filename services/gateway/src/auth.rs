use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use mercato_security::{bearer_token, headers, CurrentUser, JwtValidator, SecurityError};
use tracing::debug;

use crate::state::GatewayState;

/// Replace client-supplied identity headers with the ones proven by the
/// bearer token.
///
/// Public requests pass without a token; when they carry a valid one the
/// identity is still forwarded.
pub async fn authenticate(State(state): State<GatewayState>, mut req: Request, next: Next) -> Response {
    for name in headers::ALL {
        req.headers_mut().remove(name);
    }

    // unknown paths fall through to the 404
    if state.routes.resolve(req.uri().path()).is_none() {
        return next.run(req).await;
    }

    let public = state.public.is_public(req.method(), req.uri().path());
    match identify(&state.validator, req.headers()) {
        Ok(user) => user.write_headers(req.headers_mut()),
        Err(SecurityError::MissingAuthHeader) if public => {}
        Err(e) if public => {
            debug!(path = %req.uri().path(), error = %e, "Ignoring bad token on public route");
        }
        Err(e) => {
            debug!(method = %req.method(), path = %req.uri().path(), error = %e, "Rejected");
            return e.into_response();
        }
    }
    next.run(req).await
}

fn identify(validator: &JwtValidator, headers: &HeaderMap) -> Result<CurrentUser, SecurityError> {
    let token = bearer_token(headers)?;
    let claims = validator.validate(token)?;
    CurrentUser::from_claims(&claims)
}
