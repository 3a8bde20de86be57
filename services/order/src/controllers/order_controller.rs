use axum::routing::{get, post, put};
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::{CurrentUser, Role};

use crate::models::{CreateOrderRequest, Order, OrderFilter, StatusRequest};
use crate::repository::OrderScope;
use crate::services::OrderService;
use crate::state::OrderState;

pub fn routes() -> Router<OrderState> {
    Router::new()
        .route("/orders", get(list_all).post(create))
        .route("/orders/me", get(list_mine))
        .route("/orders/{id}", get(get_one))
        .route("/orders/{id}/cancel", post(cancel))
        .route("/orders/{id}/status", put(update_status))
}

async fn create(
    State(service): State<OrderService>,
    user: CurrentUser,
    Valid(body): Valid<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), HttpError> {
    let order = service.create(&user, &body.shipping_address).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_mine(
    State(service): State<OrderService>,
    user: CurrentUser,
    Query(pageable): Query<Pageable>,
) -> Result<Json<Page<Order>>, HttpError> {
    let scope = OrderScope {
        user_id: Some(user.id),
        status: None,
    };
    service.list(scope, &pageable).await.map(Json)
}

async fn list_all(
    State(service): State<OrderService>,
    user: CurrentUser,
    Query(pageable): Query<Pageable>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Page<Order>>, HttpError> {
    user.require_role(Role::Admin)?;
    let scope = OrderScope {
        user_id: None,
        status: filter.status,
    };
    service.list(scope, &pageable).await.map(Json)
}

async fn get_one(
    State(service): State<OrderService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Order>, HttpError> {
    service.get_for(&user, id).await.map(Json)
}

async fn cancel(
    State(service): State<OrderService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Order>, HttpError> {
    service.cancel(&user, id).await.map(Json)
}

async fn update_status(
    State(service): State<OrderService>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Valid(body): Valid<StatusRequest>,
) -> Result<Json<Order>, HttpError> {
    service.update_status(&user, id, body.status).await.map(Json)
}
