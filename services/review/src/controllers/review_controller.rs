use axum::routing::{get, post, put};
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;

use crate::models::{CreateReviewRequest, RatingSummary, Review, ReviewBody};
use crate::services::ReviewService;
use crate::state::ReviewState;

pub fn routes() -> Router<ReviewState> {
    Router::new()
        .route("/reviews", post(create))
        .route("/reviews/{id}", put(update).delete(delete))
        .route("/reviews/product/{product_id}", get(list_for_product))
        .route("/reviews/product/{product_id}/summary", get(summary))
}

async fn create(
    State(service): State<ReviewService>,
    user: CurrentUser,
    Valid(body): Valid<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), HttpError> {
    let review = service.create(&user, body.product_id, &body.body).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn list_for_product(
    State(service): State<ReviewService>,
    Path(product_id): Path<i64>,
    Query(pageable): Query<Pageable>,
) -> Result<Json<Page<Review>>, HttpError> {
    service.list_for_product(product_id, &pageable).await.map(Json)
}

async fn summary(
    State(service): State<ReviewService>,
    Path(product_id): Path<i64>,
) -> Result<Json<RatingSummary>, HttpError> {
    service.summary(product_id).await.map(Json)
}

async fn update(
    State(service): State<ReviewService>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Valid(body): Valid<ReviewBody>,
) -> Result<Json<Review>, HttpError> {
    service.update(&user, id, &body).await.map(Json)
}

async fn delete(
    State(service): State<ReviewService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
