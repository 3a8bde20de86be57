use axum::routing::{get, post};
use axum::Router;
use mercato_core::prelude::*;
use mercato_security::CurrentUser;

use crate::models::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, User};
use crate::services::AuthService;
use crate::state::AuthState;

pub fn routes() -> Router<AuthState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

async fn register(
    State(service): State<AuthService>,
    Valid(body): Valid<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), HttpError> {
    let user = service.register(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(service): State<AuthService>,
    Valid(body): Valid<LoginRequest>,
) -> Result<Json<TokenResponse>, HttpError> {
    service.login(body).await.map(Json)
}

async fn refresh(
    State(service): State<AuthService>,
    Valid(body): Valid<RefreshRequest>,
) -> Result<Json<TokenResponse>, HttpError> {
    service.refresh(body).await.map(Json)
}

async fn logout(
    State(service): State<AuthService>,
    Valid(body): Valid<RefreshRequest>,
) -> Result<StatusCode, HttpError> {
    service.logout(body).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(
    State(service): State<AuthService>,
    user: CurrentUser,
) -> Result<Json<User>, HttpError> {
    service.get_user(user.id).await.map(Json)
}
