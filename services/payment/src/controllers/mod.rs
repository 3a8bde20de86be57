pub mod payment_controller;

use axum::Router;

use crate::state::PaymentState;

pub fn routes() -> Router<PaymentState> {
    Router::new().merge(payment_controller::routes())
}
