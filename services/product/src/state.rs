use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use mercato_cache::{CacheAside, CacheStore, InMemoryStore};
use mercato_clients::ShopClient;
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;
use tracing::info;

use crate::repository::ProductRepository;
use crate::services::ProductService;

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Clone, FromRef)]
pub struct ProductState {
    pub product_service: ProductService,
    pub pool: SqlitePool,
}

impl ProductState {
    pub fn new(pool: SqlitePool, shops: ShopClient, cache: CacheAside) -> Self {
        Self {
            product_service: ProductService::new(ProductRepository::new(pool.clone()), shops, cache),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://product.db", crate::SCHEMA)
                .await?;
        let shops = ShopClient::from_config(config)?;
        let ttl = Duration::from_secs(config.get_or("cache.ttl", DEFAULT_CACHE_TTL_SECS));
        let cache = CacheAside::new(cache_store(config).await?, "product", ttl);
        Ok(Self::new(pool, shops, cache))
    }
}

#[cfg(feature = "redis")]
async fn cache_store(config: &MercatoConfig) -> Result<Arc<dyn CacheStore>, BoxError> {
    if let Ok(url) = config.get::<String>("cache.redis.url") {
        let store = mercato_cache::redis_store::RedisStore::connect(&url, "mercato").await?;
        return Ok(Arc::new(store));
    }
    info!("Using in-memory product cache");
    Ok(Arc::new(InMemoryStore::new()))
}

#[cfg(not(feature = "redis"))]
async fn cache_store(_config: &MercatoConfig) -> Result<Arc<dyn CacheStore>, BoxError> {
    info!("Using in-memory product cache");
    Ok(Arc::new(InMemoryStore::new()))
}
