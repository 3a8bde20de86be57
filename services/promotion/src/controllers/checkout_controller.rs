use axum::routing::post;
use axum::Router;
use mercato_core::prelude::*;
use mercato_security::CurrentUser;

use crate::models::{CodeRequest, PromotionQuote};
use crate::services::PromotionService;
use crate::state::PromotionState;

/// Promo codes against the caller's cart.
pub fn routes() -> Router<PromotionState> {
    Router::new()
        .route("/promotions/validate", post(validate))
        .route("/promotions/apply", post(apply))
}

async fn validate(
    State(service): State<PromotionService>,
    user: CurrentUser,
    Valid(body): Valid<CodeRequest>,
) -> Result<Json<PromotionQuote>, HttpError> {
    service.validate(user.id, &body.code).await.map(Json)
}

async fn apply(
    State(service): State<PromotionService>,
    user: CurrentUser,
    Valid(body): Valid<CodeRequest>,
) -> Result<Json<PromotionQuote>, HttpError> {
    service.apply(user.id, &body.code).await.map(Json)
}
