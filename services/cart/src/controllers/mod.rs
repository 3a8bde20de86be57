pub mod cart_controller;
pub mod internal_controller;

use axum::Router;

use crate::state::CartState;

pub fn routes() -> Router<CartState> {
    Router::new()
        .merge(cart_controller::routes())
        .merge(internal_controller::routes())
}
