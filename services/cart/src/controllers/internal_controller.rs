use axum::routing::{get, put};
use axum::Router;
use mercato_clients::CartView;
use mercato_core::prelude::*;

use crate::models::PromotionRequest;
use crate::services::CartService;
use crate::state::CartState;

/// Used by the promotion and order services.
pub fn routes() -> Router<CartState> {
    Router::new()
        .route("/internal/carts/{user_id}", get(view).delete(clear))
        .route(
            "/internal/carts/{user_id}/promotion",
            put(apply_promotion).delete(clear_promotion),
        )
}

async fn view(
    State(service): State<CartService>,
    Path(user_id): Path<i64>,
) -> Result<Json<CartView>, HttpError> {
    service.view(user_id).await.map(Json)
}

async fn clear(
    State(service): State<CartService>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    service.clear(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_promotion(
    State(service): State<CartService>,
    Path(user_id): Path<i64>,
    Valid(body): Valid<PromotionRequest>,
) -> Result<Json<CartView>, HttpError> {
    service
        .apply_promotion(user_id, &body.promo_code, body.discount)
        .await
        .map(Json)
}

async fn clear_promotion(
    State(service): State<CartService>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    service.clear_promotion(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
