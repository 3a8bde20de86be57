pub mod review_controller;

use axum::Router;

use crate::state::ReviewState;

pub fn routes() -> Router<ReviewState> {
    Router::new().merge(review_controller::routes())
}
