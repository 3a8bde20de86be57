use axum::routing::get;
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;

use crate::models::{CreateProductRequest, Product, ProductDetails, ProductFilter};
use crate::services::ProductService;
use crate::state::ProductState;

pub fn routes() -> Router<ProductState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", get(get_one).put(update).delete(remove))
}

async fn list(
    State(service): State<ProductService>,
    Query(pageable): Query<Pageable>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Page<Product>>, HttpError> {
    service.search(&filter, &pageable).await.map(Json)
}

async fn get_one(
    State(service): State<ProductService>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, HttpError> {
    service.get(id).await.map(Json)
}

async fn create(
    State(service): State<ProductService>,
    user: CurrentUser,
    Valid(body): Valid<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), HttpError> {
    let product = service.create(&user, body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update(
    State(service): State<ProductService>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Valid(body): Valid<ProductDetails>,
) -> Result<Json<Product>, HttpError> {
    service.update(&user, id, body).await.map(Json)
}

async fn remove(
    State(service): State<ProductService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
