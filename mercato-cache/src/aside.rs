use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::CacheStore;

/// Typed cache-aside wrapper: JSON values under `<prefix>:<key>`.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    prefix: String,
    ttl: Duration,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ttl,
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    /// Return the cached value, or run `load`, cache its result and return it.
    ///
    /// Errors from `load` are returned untouched and nothing is cached.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let full_key = self.key(key);
        if let Some(bytes) = self.store.get(&full_key).await {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key = %full_key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(key = %full_key, error = %e, "Dropping undecodable cache entry");
                    self.store.remove(&full_key).await;
                }
            }
        }

        debug!(key = %full_key, "Cache miss");
        let value = load().await?;
        match serde_json::to_vec(&value) {
            Ok(encoded) => self.store.set(&full_key, Bytes::from(encoded), self.ttl).await,
            Err(e) => warn!(key = %full_key, error = %e, "Value not cacheable"),
        }
        Ok(value)
    }

    pub async fn evict(&self, key: &str) {
        self.store.remove(&self.key(key)).await;
    }

    /// Evict every entry under this wrapper's prefix.
    pub async fn evict_all(&self) {
        self.store.remove_by_prefix(&format!("{}:", self.prefix)).await;
    }
}
