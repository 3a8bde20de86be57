use axum::routing::{get, post};
use axum::Router;
use mercato_clients::{Availability, StockChange};
use mercato_core::prelude::*;

use crate::models::AvailabilityQuery;
use crate::services::ProductService;
use crate::state::ProductState;

/// Stock endpoints used by the cart and order services.
pub fn routes() -> Router<ProductState> {
    Router::new()
        .route("/internal/products/{id}/availability", get(availability))
        .route("/internal/products/{id}/stock/decrease", post(decrease))
        .route("/internal/products/{id}/stock/increase", post(increase))
}

async fn availability(
    State(service): State<ProductService>,
    Path(id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Availability>, HttpError> {
    service.availability(id, query.quantity).await.map(Json)
}

async fn decrease(
    State(service): State<ProductService>,
    Path(id): Path<i64>,
    Json(change): Json<StockChange>,
) -> Result<StatusCode, HttpError> {
    service.decrease_stock(id, change.quantity).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn increase(
    State(service): State<ProductService>,
    Path(id): Path<i64>,
    Json(change): Json<StockChange>,
) -> Result<StatusCode, HttpError> {
    service.increase_stock(id, change.quantity).await?;
    Ok(StatusCode::NO_CONTENT)
}
