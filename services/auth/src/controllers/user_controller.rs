use axum::routing::{get, put};
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::{CurrentUser, Role};

use crate::models::{UpdateRoleRequest, User};
use crate::services::AuthService;
use crate::state::AuthState;

/// User administration, ADMIN only.
pub fn routes() -> Router<AuthState> {
    Router::new()
        .route("/auth/users", get(list))
        .route("/auth/users/{id}/role", put(update_role))
}

async fn list(
    State(service): State<AuthService>,
    user: CurrentUser,
    Query(pageable): Query<Pageable>,
) -> Result<Json<Page<User>>, HttpError> {
    user.require_role(Role::Admin)?;
    service.list_users(&pageable).await.map(Json)
}

async fn update_role(
    State(service): State<AuthService>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Valid(body): Valid<UpdateRoleRequest>,
) -> Result<Json<User>, HttpError> {
    user.require_role(Role::Admin)?;
    service.update_role(id, body.role).await.map(Json)
}
