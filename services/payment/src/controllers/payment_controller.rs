use axum::routing::{get, post};
use axum::Router;
use mercato_core::prelude::*;
use mercato_security::CurrentUser;

use crate::models::{Payment, PaymentRequest};
use crate::services::PaymentService;
use crate::state::PaymentState;

pub fn routes() -> Router<PaymentState> {
    Router::new()
        .route("/payments", post(pay))
        .route("/payments/{id}", get(get_one))
        .route("/payments/{id}/refund", post(refund))
        .route("/payments/order/{order_id}", get(list_for_order))
}

async fn pay(
    State(service): State<PaymentService>,
    user: CurrentUser,
    Valid(body): Valid<PaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), HttpError> {
    let payment = service.pay(&user, body.order_id, body.method).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn get_one(
    State(service): State<PaymentService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, HttpError> {
    service.get(&user, id).await.map(Json)
}

async fn list_for_order(
    State(service): State<PaymentService>,
    user: CurrentUser,
    Path(order_id): Path<i64>,
) -> Result<Json<Vec<Payment>>, HttpError> {
    service.list_for_order(&user, order_id).await.map(Json)
}

async fn refund(
    State(service): State<PaymentService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, HttpError> {
    service.refund(&user, id).await.map(Json)
}
