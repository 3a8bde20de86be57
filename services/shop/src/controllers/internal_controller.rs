use axum::routing::get;
use axum::Router;
use mercato_core::prelude::*;

use crate::models::Shop;
use crate::services::ShopService;
use crate::state::ShopState;

/// Service-to-service lookups. Not routed by the gateway.
pub fn routes() -> Router<ShopState> {
    Router::new().route("/internal/shops/{id}", get(get_shop))
}

async fn get_shop(
    State(service): State<ShopService>,
    Path(id): Path<i64>,
) -> Result<Json<Shop>, HttpError> {
    service.get(id).await.map(Json)
}
