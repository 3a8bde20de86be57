use axum::extract::FromRef;
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::repository::NotificationRepository;
use crate::services::NotificationService;

#[derive(Clone, FromRef)]
pub struct NotificationState {
    pub notification_service: NotificationService,
    pub pool: SqlitePool,
}

impl NotificationState {
    pub fn new(pool: SqlitePool) -> Self {
        let repo = NotificationRepository::new(pool.clone());
        Self {
            notification_service: NotificationService::new(repo),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool = mercato_data::pool::connect_from_config(
            config,
            "sqlite://notification.db",
            crate::SCHEMA,
        )
        .await?;
        Ok(Self::new(pool))
    }
}
