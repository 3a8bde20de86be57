use axum::extract::FromRef;
use mercato_clients::{CartClient, NotificationClient, ProductClient};
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::repository::OrderRepository;
use crate::services::OrderService;

#[derive(Clone, FromRef)]
pub struct OrderState {
    pub order_service: OrderService,
    pub pool: SqlitePool,
}

/// Upstream services an order touches.
#[derive(Clone)]
pub struct OrderClients {
    pub carts: CartClient,
    pub products: ProductClient,
    pub notifications: NotificationClient,
}

impl OrderClients {
    pub fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        Ok(Self {
            carts: CartClient::from_config(config)?,
            products: ProductClient::from_config(config)?,
            notifications: NotificationClient::from_config(config)?,
        })
    }
}

impl OrderState {
    pub fn new(pool: SqlitePool, clients: OrderClients) -> Self {
        Self {
            order_service: OrderService::new(OrderRepository::new(pool.clone()), clients),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://order.db", crate::SCHEMA)
                .await?;
        Ok(Self::new(pool, OrderClients::from_config(config)?))
    }
}
