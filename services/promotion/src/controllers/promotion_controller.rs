use axum::routing::get;
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::{CurrentUser, Role};

use crate::models::{Promotion, PromotionRequest};
use crate::services::PromotionService;
use crate::state::PromotionState;

pub fn routes() -> Router<PromotionState> {
    Router::new()
        .route("/promotions", get(list).post(create))
        .route("/promotions/{id}", get(get_one).put(update).delete(remove))
        .route("/promotions/code/{code}", get(by_code))
}

async fn list(
    State(service): State<PromotionService>,
    user: CurrentUser,
    Query(pageable): Query<Pageable>,
) -> Result<Json<Page<Promotion>>, HttpError> {
    user.require_role(Role::Admin)?;
    service.list(&pageable).await.map(Json)
}

async fn get_one(
    State(service): State<PromotionService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Promotion>, HttpError> {
    user.require_role(Role::Admin)?;
    service.get(id).await.map(Json)
}

async fn by_code(
    State(service): State<PromotionService>,
    _user: CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<Promotion>, HttpError> {
    service.get_by_code(&code).await.map(Json)
}

async fn create(
    State(service): State<PromotionService>,
    user: CurrentUser,
    Valid(body): Valid<PromotionRequest>,
) -> Result<(StatusCode, Json<Promotion>), HttpError> {
    user.require_role(Role::Admin)?;
    let promo = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(promo)))
}

async fn update(
    State(service): State<PromotionService>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Valid(body): Valid<PromotionRequest>,
) -> Result<Json<Promotion>, HttpError> {
    user.require_role(Role::Admin)?;
    service.update(id, body).await.map(Json)
}

async fn remove(
    State(service): State<PromotionService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    user.require_role(Role::Admin)?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
