//! Cache-aside for Mercato services.
//!
//! A [`CacheStore`] holds raw bytes with a per-entry TTL. [`InMemoryStore`]
//! is the default; [`RedisStore`](redis_store::RedisStore) is available with
//! the `redis` feature. [`CacheAside`] layers typed JSON reads-through and
//! evictions on top of any store.

mod aside;
mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;

pub use aside::CacheAside;
pub use memory::InMemoryStore;

/// Boxed future returned by [`CacheStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Pluggable cache backend.
///
/// Stores are best-effort: a backend failure reads as a miss and writes are
/// dropped, so the caller always falls back to the source of truth.
pub trait CacheStore: Send + Sync + 'static {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Bytes>>;
    fn set<'a>(&'a self, key: &'a str, value: Bytes, ttl: Duration) -> StoreFuture<'a, ()>;
    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()>;
    fn remove_by_prefix<'a>(&'a self, prefix: &'a str) -> StoreFuture<'a, ()>;
}
