use axum::extract::FromRef;
use mercato_clients::ProductClient;
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::repository::CartRepository;
use crate::services::CartService;

#[derive(Clone, FromRef)]
pub struct CartState {
    pub cart_service: CartService,
    pub pool: SqlitePool,
}

impl CartState {
    pub fn new(pool: SqlitePool, products: ProductClient) -> Self {
        Self {
            cart_service: CartService::new(CartRepository::new(pool.clone()), products),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://cart.db", crate::SCHEMA)
                .await?;
        Ok(Self::new(pool, ProductClient::from_config(config)?))
    }
}
