use chrono::Utc;
use mercato_data::{DataError, Pageable};
use sqlx::SqlitePool;

use crate::models::{NewNotification, Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, n: &NewNotification) -> Result<Notification, DataError> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, kind, title, message, read, created_at) \
             VALUES (?, ?, ?, ?, 0, ?) RETURNING *",
        )
        .bind(n.user_id)
        .bind(n.kind.as_str())
        .bind(n.title.trim())
        .bind(n.message.trim())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    /// Scoped to `user_id`: another user's notification is simply not found.
    pub async fn find_owned(&self, user_id: i64, id: i64) -> Result<Option<Notification>, DataError> {
        let notification = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notification)
    }

    pub async fn list(
        &self,
        user_id: i64,
        unread_only: bool,
        pageable: &Pageable,
    ) -> Result<(Vec<Notification>, u64), DataError> {
        // read is 0/1, so `read <= 0` keeps unread rows only
        let max_read = if unread_only { 0 } else { 1 };
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = ? AND read <= ? \
             ORDER BY id DESC LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(max_read)
        .bind(pageable.limit() as i64)
        .bind(pageable.offset() as i64)
        .fetch_all(&self.pool)
        .await?;
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read <= ?")
                .bind(user_id)
                .bind(max_read)
                .fetch_one(&self.pool)
                .await?;
        Ok((notifications, total as u64))
    }

    pub async fn count_unread(&self, user_id: i64) -> Result<i64, DataError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read = 0")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn mark_read(&self, user_id: i64, id: i64) -> Result<Option<Notification>, DataError> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = 1 WHERE id = ? AND user_id = ? RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notification)
    }

    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64, DataError> {
        let result = sqlx::query("UPDATE notifications SET read = 1 WHERE user_id = ? AND read = 0")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<bool, DataError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
