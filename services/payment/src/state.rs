use axum::extract::FromRef;
use mercato_clients::{NotificationClient, OrderClient};
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::repository::PaymentRepository;
use crate::services::PaymentService;

#[derive(Clone, FromRef)]
pub struct PaymentState {
    pub payment_service: PaymentService,
    pub pool: SqlitePool,
}

impl PaymentState {
    pub fn new(pool: SqlitePool, orders: OrderClient, notifications: NotificationClient) -> Self {
        let repo = PaymentRepository::new(pool.clone());
        Self {
            payment_service: PaymentService::new(repo, orders, notifications),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://payment.db", crate::SCHEMA)
                .await?;
        Ok(Self::new(
            pool,
            OrderClient::from_config(config)?,
            NotificationClient::from_config(config)?,
        ))
    }
}
