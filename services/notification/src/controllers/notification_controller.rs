use axum::routing::{get, put};
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;

use crate::models::{InboxFilter, Notification, UnreadCount, Updated};
use crate::services::NotificationService;
use crate::state::NotificationState;

pub fn routes() -> Router<NotificationState> {
    Router::new()
        .route("/notifications/me", get(inbox))
        .route("/notifications/me/unread-count", get(unread_count))
        .route("/notifications/me/read-all", put(mark_all_read))
        .route("/notifications/{id}", get(get_one).delete(delete))
        .route("/notifications/{id}/read", put(mark_read))
}

async fn inbox(
    State(service): State<NotificationService>,
    user: CurrentUser,
    Query(pageable): Query<Pageable>,
    Query(filter): Query<InboxFilter>,
) -> Result<Json<Page<Notification>>, HttpError> {
    service.inbox(&user, filter.unread_only, &pageable).await.map(Json)
}

async fn unread_count(
    State(service): State<NotificationService>,
    user: CurrentUser,
) -> Result<Json<UnreadCount>, HttpError> {
    let count = service.unread_count(&user).await?;
    Ok(Json(UnreadCount { count }))
}

async fn get_one(
    State(service): State<NotificationService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Notification>, HttpError> {
    service.get(&user, id).await.map(Json)
}

async fn mark_read(
    State(service): State<NotificationService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Notification>, HttpError> {
    service.mark_read(&user, id).await.map(Json)
}

async fn mark_all_read(
    State(service): State<NotificationService>,
    user: CurrentUser,
) -> Result<Json<Updated>, HttpError> {
    let updated = service.mark_all_read(&user).await?;
    Ok(Json(Updated { updated }))
}

async fn delete(
    State(service): State<NotificationService>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
