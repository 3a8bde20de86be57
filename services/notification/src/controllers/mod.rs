pub mod internal_controller;
pub mod notification_controller;

use axum::Router;

use crate::state::NotificationState;

pub fn routes() -> Router<NotificationState> {
    Router::new()
        .merge(notification_controller::routes())
        .merge(internal_controller::routes())
}
