use chrono::Utc;
use mercato_data::{DataError, Pageable};
use sqlx::SqlitePool;

use crate::models::{Promotion, PromotionRequest};

#[derive(Clone)]
pub struct PromotionRepository {
    pool: SqlitePool,
}

impl PromotionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Promotion>, DataError> {
        let promo = sqlx::query_as::<_, Promotion>("SELECT * FROM promotions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(promo)
    }

    /// `code` must already be upper-cased.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>, DataError> {
        let promo = sqlx::query_as::<_, Promotion>("SELECT * FROM promotions WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(promo)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<(Vec<Promotion>, u64), DataError> {
        let promos =
            sqlx::query_as::<_, Promotion>("SELECT * FROM promotions ORDER BY id LIMIT ? OFFSET ?")
                .bind(pageable.limit() as i64)
                .bind(pageable.offset() as i64)
                .fetch_all(&self.pool)
                .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM promotions")
            .fetch_one(&self.pool)
            .await?;
        Ok((promos, total as u64))
    }

    pub async fn insert(&self, code: &str, req: &PromotionRequest) -> Result<Promotion, DataError> {
        let promo = sqlx::query_as::<_, Promotion>(
            "INSERT INTO promotions (code, name, description, discount_type, discount_value, \
             max_discount, min_order_amount, usage_limit, shop_id, category, starts_at, ends_at, \
             active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(code)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.discount_type)
        .bind(req.discount_value)
        .bind(req.max_discount)
        .bind(req.min_order_amount)
        .bind(req.usage_limit)
        .bind(req.shop_id)
        .bind(&req.category)
        .bind(req.starts_at)
        .bind(req.ends_at)
        .bind(req.active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(promo)
    }

    pub async fn update(
        &self,
        id: i64,
        code: &str,
        req: &PromotionRequest,
    ) -> Result<Option<Promotion>, DataError> {
        let promo = sqlx::query_as::<_, Promotion>(
            "UPDATE promotions SET code = ?, name = ?, description = ?, discount_type = ?, \
             discount_value = ?, max_discount = ?, min_order_amount = ?, usage_limit = ?, \
             shop_id = ?, category = ?, starts_at = ?, ends_at = ?, active = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(code)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.discount_type)
        .bind(req.discount_value)
        .bind(req.max_discount)
        .bind(req.min_order_amount)
        .bind(req.usage_limit)
        .bind(req.shop_id)
        .bind(&req.category)
        .bind(req.starts_at)
        .bind(req.ends_at)
        .bind(req.active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(promo)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, DataError> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Count one use unless the limit is already reached. Returns `false` on
    /// a lost race for the last use.
    pub async fn increment_usage(&self, id: i64) -> Result<bool, DataError> {
        let result = sqlx::query(
            "UPDATE promotions SET usage_count = usage_count + 1 \
             WHERE id = ? AND (usage_limit IS NULL OR usage_count < usage_limit)",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
