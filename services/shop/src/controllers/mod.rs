pub mod internal_controller;
pub mod shop_controller;

use axum::Router;

use crate::state::ShopState;

pub fn routes() -> Router<ShopState> {
    Router::new()
        .merge(shop_controller::routes())
        .merge(internal_controller::routes())
}
