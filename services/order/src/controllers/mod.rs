pub mod internal_controller;
pub mod order_controller;

use axum::Router;

use crate::state::OrderState;

pub fn routes() -> Router<OrderState> {
    Router::new()
        .merge(order_controller::routes())
        .merge(internal_controller::routes())
}
