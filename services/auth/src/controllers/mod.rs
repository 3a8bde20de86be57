pub mod auth_controller;
pub mod user_controller;

use axum::Router;

use crate::state::AuthState;

pub fn routes() -> Router<AuthState> {
    Router::new()
        .merge(auth_controller::routes())
        .merge(user_controller::routes())
}
