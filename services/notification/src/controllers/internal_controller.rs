use axum::routing::post;
use axum::Router;
use mercato_core::prelude::*;

use crate::models::{NewNotification, Notification};
use crate::services::NotificationService;
use crate::state::NotificationState;

/// Used by the order and payment services.
pub fn routes() -> Router<NotificationState> {
    Router::new().route("/internal/notifications", post(create))
}

async fn create(
    State(service): State<NotificationService>,
    Valid(body): Valid<NewNotification>,
) -> Result<(StatusCode, Json<Notification>), HttpError> {
    let notification = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}
