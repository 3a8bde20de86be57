pub mod checkout_controller;
pub mod promotion_controller;

use axum::Router;

use crate::state::PromotionState;

pub fn routes() -> Router<PromotionState> {
    Router::new()
        .merge(promotion_controller::routes())
        .merge(checkout_controller::routes())
}
