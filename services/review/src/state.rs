use axum::extract::FromRef;
use mercato_clients::ProductClient;
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::repository::ReviewRepository;
use crate::services::ReviewService;

#[derive(Clone, FromRef)]
pub struct ReviewState {
    pub review_service: ReviewService,
    pub pool: SqlitePool,
}

impl ReviewState {
    pub fn new(pool: SqlitePool, products: ProductClient) -> Self {
        let service = ReviewService::new(ReviewRepository::new(pool.clone()), products);
        Self {
            review_service: service,
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://review.db", crate::SCHEMA)
                .await?;
        Ok(Self::new(pool, ProductClient::from_config(config)?))
    }
}
