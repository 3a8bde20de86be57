use chrono::Utc;
use mercato_data::{DataError, Pageable};
use sqlx::SqlitePool;

use crate::models::{Review, ReviewBody};

#[derive(Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Review>, DataError> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(review)
    }

    pub async fn exists(&self, user_id: i64, product_id: i64) -> Result<bool, DataError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE user_id = ? AND product_id = ?")
                .bind(user_id)
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    /// Newest first; ties broken by id so paging is stable.
    pub async fn list_for_product(
        &self,
        product_id: i64,
        pageable: &Pageable,
    ) -> Result<(Vec<Review>, u64), DataError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE product_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(product_id)
        .bind(pageable.limit() as i64)
        .bind(pageable.offset() as i64)
        .fetch_all(&self.pool)
        .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE product_id = ?")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;
        Ok((reviews, total as u64))
    }

    /// `(AVG(rating), COUNT(*))`; the average is NULL without reviews.
    pub async fn rating_stats(&self, product_id: i64) -> Result<(Option<f64>, i64), DataError> {
        let stats = sqlx::query_as(
            "SELECT AVG(CAST(rating AS REAL)), COUNT(*) FROM reviews WHERE product_id = ?",
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    pub async fn insert(
        &self,
        user_id: i64,
        product_id: i64,
        body: &ReviewBody,
    ) -> Result<Review, DataError> {
        let now = Utc::now();
        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (product_id, user_id, rating, comment, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(product_id)
        .bind(user_id)
        .bind(body.rating)
        .bind(body.comment.trim())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }

    pub async fn update(&self, id: i64, body: &ReviewBody) -> Result<Review, DataError> {
        let review = sqlx::query_as::<_, Review>(
            "UPDATE reviews SET rating = ?, comment = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(body.rating)
        .bind(body.comment.trim())
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DataError> {
        sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
