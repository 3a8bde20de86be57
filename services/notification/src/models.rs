use chrono::{DateTime, Utc};
use garde::Validate;
use mercato_clients::NotificationKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /internal/notifications`, same shape as
/// [`mercato_clients::NotificationRequest`].
#[derive(Debug, Deserialize, Validate)]
pub struct NewNotification {
    #[garde(range(min = 1))]
    pub user_id: i64,
    #[garde(skip)]
    pub kind: NotificationKind,
    #[garde(length(min = 1, max = 200))]
    pub title: String,
    #[garde(length(min = 1, max = 2000))]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InboxFilter {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub updated: u64,
}
