use axum::routing::{get, put};
use axum::Router;
use mercato_clients::StatusUpdate;
use mercato_core::prelude::*;

use crate::models::Order;
use crate::services::OrderService;
use crate::state::OrderState;

/// Used by the payment service.
pub fn routes() -> Router<OrderState> {
    Router::new()
        .route("/internal/orders/{id}", get(get_order))
        .route("/internal/orders/{id}/status", put(update_status))
}

async fn get_order(
    State(service): State<OrderService>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, HttpError> {
    service.get(id).await.map(Json)
}

async fn update_status(
    State(service): State<OrderService>,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Order>, HttpError> {
    service.update_status_internal(id, body.status).await.map(Json)
}
