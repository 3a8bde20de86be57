use axum::routing::{delete, get, post, put};
use axum::Router;
use mercato_clients::CartView;
use mercato_core::prelude::*;
use mercato_security::CurrentUser;

use crate::models::{AddItemRequest, UpdateItemRequest};
use crate::services::CartService;
use crate::state::CartState;

pub fn routes() -> Router<CartState> {
    Router::new()
        .route("/carts/me", get(view).delete(clear))
        .route("/carts/me/items", post(add_item))
        .route(
            "/carts/me/items/{product_id}",
            put(update_item).delete(remove_item),
        )
        .route("/carts/me/promotion", delete(clear_promotion))
}

async fn view(
    State(service): State<CartService>,
    user: CurrentUser,
) -> Result<Json<CartView>, HttpError> {
    service.view(user.id).await.map(Json)
}

async fn add_item(
    State(service): State<CartService>,
    user: CurrentUser,
    Valid(body): Valid<AddItemRequest>,
) -> Result<Json<CartView>, HttpError> {
    service
        .add_item(user.id, body.product_id, body.quantity)
        .await
        .map(Json)
}

async fn update_item(
    State(service): State<CartService>,
    user: CurrentUser,
    Path(product_id): Path<i64>,
    Valid(body): Valid<UpdateItemRequest>,
) -> Result<Json<CartView>, HttpError> {
    service
        .update_item(user.id, product_id, body.quantity)
        .await
        .map(Json)
}

async fn remove_item(
    State(service): State<CartService>,
    user: CurrentUser,
    Path(product_id): Path<i64>,
) -> Result<Json<CartView>, HttpError> {
    service.remove_item(user.id, product_id).await.map(Json)
}

async fn clear(
    State(service): State<CartService>,
    user: CurrentUser,
) -> Result<StatusCode, HttpError> {
    service.clear(user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_promotion(
    State(service): State<CartService>,
    user: CurrentUser,
) -> Result<Json<CartView>, HttpError> {
    service.clear_promotion(user.id).await.map(Json)
}
