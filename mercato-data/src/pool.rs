//! SQLite pool creation and schema bootstrap.
//!
//! Each service owns one database and ships its schema as a `schema.sql`
//! made of idempotent `CREATE ... IF NOT EXISTS` statements, applied at start.

use std::str::FromStr;

use mercato_core::MercatoConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::DataError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a pool for `url`.
///
/// In-memory databases live as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, DataError> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    let pool = pool.connect_with(options).await?;
    info!(url, "Database pool ready");
    Ok(pool)
}

/// Connect using `database.url` and `database.pool.max`, then apply `schema`.
pub async fn connect_from_config(
    config: &MercatoConfig,
    default_url: &str,
    schema: &str,
) -> Result<SqlitePool, DataError> {
    let url = config.get_or("database.url", default_url.to_string());
    let max = config.get_or("database.pool.max", DEFAULT_MAX_CONNECTIONS);
    let pool = connect(&url, max).await?;
    apply_schema(&pool, schema).await?;
    Ok(pool)
}

pub async fn apply_schema(pool: &SqlitePool, schema: &str) -> Result<(), DataError> {
    sqlx::raw_sql(schema).execute(pool).await?;
    Ok(())
}
