use axum::routing::get;
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;

use crate::models::{Shop, ShopRequest};
use crate::services::ShopService;
use crate::state::ShopState;

pub fn routes() -> Router<ShopState> {
    Router::new()
        .route("/shops", get(list).post(create))
        .route("/shops/me", get(mine))
        .route("/shops/{id}", get(get_one).put(update).delete(remove))
}

async fn list(
    State(service): State<ShopService>,
    Query(pageable): Query<Pageable>,
) -> Result<Json<Page<Shop>>, HttpError> {
    service.list(&pageable).await.map(Json)
}

async fn get_one(
    State(service): State<ShopService>,
    Path(id): Path<i64>,
) -> Result<Json<Shop>, HttpError> {
    service.get(id).await.map(Json)
}

async fn mine(
    State(service): State<ShopService>,
    user: CurrentUser,
) -> Result<Json<Shop>, HttpError> {
    service.get_by_owner(user.id).await.map(Json)
}

async fn create(
    State(service): State<ShopService>,
    user: CurrentUser,
    Valid(body): Valid<ShopRequest>,
) -> Result<(StatusCode, Json<Shop>), HttpError> {
    let shop = service.create(&user, body).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

async fn update(
    State(service): State<ShopService>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Valid(body): Valid<ShopRequest>,
) -> Result<Json<Shop>, HttpError> {
    service.update(&user, id, body).await.map(Json)
}

async fn remove(
    State(service): State<ShopService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
