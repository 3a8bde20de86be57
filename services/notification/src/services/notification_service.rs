use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;
use tracing::{debug, info};

use crate::models::{NewNotification, Notification};
use crate::repository::NotificationRepository;

#[derive(Clone)]
pub struct NotificationService {
    notifications: NotificationRepository,
}

fn not_found() -> HttpError {
    HttpError::NotFound("Notification not found".into())
}

impl NotificationService {
    pub fn new(notifications: NotificationRepository) -> Self {
        Self { notifications }
    }

    pub async fn create(&self, request: &NewNotification) -> Result<Notification, HttpError> {
        let notification = self.notifications.insert(request).await?;
        info!(
            notification_id = notification.id,
            user_id = notification.user_id,
            kind = %notification.kind,
            "Notification stored"
        );
        Ok(notification)
    }

    pub async fn inbox(
        &self,
        user: &CurrentUser,
        unread_only: bool,
        pageable: &Pageable,
    ) -> Result<Page<Notification>, HttpError> {
        let (rows, total) = self.notifications.list(user.id, unread_only, pageable).await?;
        Ok(Page::new(rows, pageable, total))
    }

    pub async fn get(&self, user: &CurrentUser, id: i64) -> Result<Notification, HttpError> {
        self.notifications
            .find_owned(user.id, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn unread_count(&self, user: &CurrentUser) -> Result<i64, HttpError> {
        Ok(self.notifications.count_unread(user.id).await?)
    }

    pub async fn mark_read(&self, user: &CurrentUser, id: i64) -> Result<Notification, HttpError> {
        self.notifications
            .mark_read(user.id, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn mark_all_read(&self, user: &CurrentUser) -> Result<u64, HttpError> {
        let updated = self.notifications.mark_all_read(user.id).await?;
        debug!(user_id = user.id, updated, "Notifications marked read");
        Ok(updated)
    }

    pub async fn delete(&self, user: &CurrentUser, id: i64) -> Result<(), HttpError> {
        if !self.notifications.delete(user.id, id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}
