use mercato_core::health::{HealthIndicator, HealthStatus};
use mercato_core::HttpError;
use mercato_data::pool::{apply_schema, connect};
use mercato_data::{DataError, DatabaseHealth};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tags (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);";

#[tokio::test]
async fn schema_is_idempotent_and_memory_pool_persists() {
    let pool = connect("sqlite::memory:", 5).await.unwrap();
    apply_schema(&pool, SCHEMA).await.unwrap();
    apply_schema(&pool, SCHEMA).await.unwrap();

    sqlx::query("INSERT INTO tags (name) VALUES ('rust')")
        .execute(&pool)
        .await
        .unwrap();
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tags")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn unique_violation_becomes_conflict() {
    let pool = connect("sqlite::memory:", 1).await.unwrap();
    apply_schema(&pool, SCHEMA).await.unwrap();
    sqlx::query("INSERT INTO tags (name) VALUES ('dup')")
        .execute(&pool)
        .await
        .unwrap();

    let err: DataError = sqlx::query("INSERT INTO tags (name) VALUES ('dup')")
        .execute(&pool)
        .await
        .unwrap_err()
        .into();
    assert!(matches!(err, DataError::Conflict(_)));
    assert!(matches!(HttpError::from(err), HttpError::Conflict(_)));
}

#[tokio::test]
async fn row_not_found_becomes_not_found() {
    let pool = connect("sqlite::memory:", 1).await.unwrap();
    apply_schema(&pool, SCHEMA).await.unwrap();
    let err: DataError = sqlx::query_as::<_, (i64,)>("SELECT id FROM tags WHERE id = 42")
        .fetch_one(&pool)
        .await
        .unwrap_err()
        .into();
    assert!(matches!(err, DataError::NotFound(_)));
}

#[tokio::test]
async fn database_health_is_up() {
    let pool = connect("sqlite::memory:", 1).await.unwrap();
    let health = DatabaseHealth::new(pool);
    assert_eq!(health.check().await, HealthStatus::Up);
}
