use axum::extract::FromRef;
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::repository::ShopRepository;
use crate::services::ShopService;

#[derive(Clone, FromRef)]
pub struct ShopState {
    pub shop_service: ShopService,
    pub pool: SqlitePool,
}

impl ShopState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            shop_service: ShopService::new(ShopRepository::new(pool.clone())),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://shop.db", crate::SCHEMA)
                .await?;
        Ok(Self::new(pool))
    }
}
