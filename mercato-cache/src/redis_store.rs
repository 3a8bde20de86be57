//! Redis-backed [`CacheStore`].

use std::time::Duration;

use bytes::Bytes;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{info, warn};

use crate::{CacheStore, StoreFuture};

/// Cache store on a shared Redis `ConnectionManager`.
///
/// Every key is namespaced with `key_prefix`. Redis errors are logged and
/// treated as misses.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connect to `url` (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str, key_prefix: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!(url = %url, "Connected to Redis cache");
        Ok(Self {
            conn,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

impl CacheStore for RedisStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Bytes>> {
        Box::pin(async move {
            let mut conn = self.conn.clone();
            match conn.get::<_, Option<Vec<u8>>>(self.key(key)).await {
                Ok(value) => value.map(Bytes::from),
                Err(e) => {
                    warn!(key, error = %e, "Redis GET failed");
                    None
                }
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: Bytes, ttl: Duration) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut conn = self.conn.clone();
            let secs = ttl.as_secs().max(1);
            if let Err(e) = conn.set_ex::<_, _, ()>(self.key(key), value.to_vec(), secs).await {
                warn!(key, error = %e, "Redis SETEX failed");
            }
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut conn = self.conn.clone();
            if let Err(e) = conn.del::<_, ()>(self.key(key)).await {
                warn!(key, error = %e, "Redis DEL failed");
            }
        })
    }

    fn remove_by_prefix<'a>(&'a self, prefix: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut conn = self.conn.clone();
            let pattern = format!("{}*", self.key(prefix));
            let keys: Vec<String> = match conn.keys(&pattern).await {
                Ok(keys) => keys,
                Err(e) => {
                    warn!(pattern, error = %e, "Redis KEYS failed");
                    return;
                }
            };
            if keys.is_empty() {
                return;
            }
            if let Err(e) = conn.del::<_, ()>(keys).await {
                warn!(pattern, error = %e, "Redis DEL failed");
            }
        })
    }
}
