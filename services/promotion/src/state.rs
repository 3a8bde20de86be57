use axum::extract::FromRef;
use mercato_clients::{CartClient, ProductClient};
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::repository::PromotionRepository;
use crate::services::PromotionService;

#[derive(Clone, FromRef)]
pub struct PromotionState {
    pub promotion_service: PromotionService,
    pub pool: SqlitePool,
}

impl PromotionState {
    pub fn new(pool: SqlitePool, carts: CartClient, products: ProductClient) -> Self {
        let repo = PromotionRepository::new(pool.clone());
        Self {
            promotion_service: PromotionService::new(repo, carts, products),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool = mercato_data::pool::connect_from_config(
            config,
            "sqlite://promotion.db",
            crate::SCHEMA,
        )
        .await?;
        Ok(Self::new(
            pool,
            CartClient::from_config(config)?,
            ProductClient::from_config(config)?,
        ))
    }
}
