pub mod internal_controller;
pub mod product_controller;

use axum::Router;

use crate::state::ProductState;

pub fn routes() -> Router<ProductState> {
    Router::new()
        .merge(product_controller::routes())
        .merge(internal_controller::routes())
}
