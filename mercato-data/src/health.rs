use std::future::Future;

use mercato_core::health::{HealthIndicator, HealthStatus};
use sqlx::SqlitePool;

/// Health check that round-trips `SELECT 1` through the pool.
pub struct DatabaseHealth {
    pool: SqlitePool,
}

impl DatabaseHealth {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HealthIndicator for DatabaseHealth {
    fn name(&self) -> &str {
        "database"
    }

    fn check(&self) -> impl Future<Output = HealthStatus> + Send {
        async move {
            match sqlx::query("SELECT 1").execute(&self.pool).await {
                Ok(_) => HealthStatus::Up,
                Err(e) => HealthStatus::Down(e.to_string()),
            }
        }
    }
}
