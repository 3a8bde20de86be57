use chrono::Utc;
use mercato_data::{DataError, Pageable};
use sqlx::SqlitePool;

use crate::models::{Shop, ShopRequest};

#[derive(Clone)]
pub struct ShopRepository {
    pool: SqlitePool,
}

impl ShopRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Shop>, DataError> {
        let shop = sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(shop)
    }

    pub async fn find_by_owner(&self, owner_id: i64) -> Result<Option<Shop>, DataError> {
        let shop = sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(shop)
    }

    pub async fn name_taken(&self, name: &str, except_id: Option<i64>) -> Result<bool, DataError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM shops WHERE name = ? AND id != ?")
                .bind(name)
                .bind(except_id.unwrap_or(-1))
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<(Vec<Shop>, u64), DataError> {
        let shops = sqlx::query_as::<_, Shop>("SELECT * FROM shops ORDER BY id LIMIT ? OFFSET ?")
            .bind(pageable.limit() as i64)
            .bind(pageable.offset() as i64)
            .fetch_all(&self.pool)
            .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shops")
            .fetch_one(&self.pool)
            .await?;
        Ok((shops, total as u64))
    }

    pub async fn insert(&self, owner_id: i64, req: &ShopRequest) -> Result<Shop, DataError> {
        let now = Utc::now();
        let shop = sqlx::query_as::<_, Shop>(
            "INSERT INTO shops (owner_id, name, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(owner_id)
        .bind(req.name.trim())
        .bind(&req.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(shop)
    }

    pub async fn update(&self, id: i64, req: &ShopRequest) -> Result<Shop, DataError> {
        let shop = sqlx::query_as::<_, Shop>(
            "UPDATE shops SET name = ?, description = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(req.name.trim())
        .bind(&req.description)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(shop)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DataError> {
        sqlx::query("DELETE FROM shops WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
