//! Test utilities shared by the Mercato service test suites.
//!
//! - [`TestApp`]: drive a router in-process with `tower::ServiceExt::oneshot`
//! - [`spawn_router`]: serve a stub upstream on `127.0.0.1:0`
//! - [`memory_pool`]: fresh in-memory SQLite pool with a schema applied
//! - [`TestJwt`]: sign tokens the gateway accepts

mod app;
mod jwt;

use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

pub use app::{resolve_path, PathToken, TestApp, TestRequest, TestResponse};
pub use jwt::TestJwt;

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// The server runs on a background task for the rest of the test.
pub async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub listener");
    let addr = listener.local_addr().expect("stub listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// An isolated in-memory database with `schema` applied.
pub async fn memory_pool(schema: &str) -> SqlitePool {
    let pool = mercato_data::pool::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory database");
    mercato_data::pool::apply_schema(&pool, schema)
        .await
        .expect("failed to apply schema");
    pool
}
