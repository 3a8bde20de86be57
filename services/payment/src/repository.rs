use chrono::Utc;
use mercato_data::DataError;
use sqlx::SqlitePool;

use crate::models::{Payment, PaymentMethod, PaymentStatus};

#[derive(Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, DataError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payment)
    }

    pub async fn find_by_order(&self, order_id: i64) -> Result<Vec<Payment>, DataError> {
        let payments =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = ? ORDER BY id")
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(payments)
    }

    pub async fn has_completed(&self, order_id: i64) -> Result<bool, DataError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM payments WHERE order_id = ? AND status = ?")
                .bind(order_id)
                .bind(PaymentStatus::Completed)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    pub async fn insert(
        &self,
        order_id: i64,
        user_id: i64,
        amount: f64,
        method: PaymentMethod,
        status: PaymentStatus,
        transaction_ref: &str,
    ) -> Result<Payment, DataError> {
        let now = Utc::now();
        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (order_id, user_id, amount, method, status, transaction_ref, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(order_id)
        .bind(user_id)
        .bind(amount)
        .bind(method)
        .bind(status)
        .bind(transaction_ref)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(payment)
    }

    pub async fn set_status(&self, id: i64, status: PaymentStatus) -> Result<Payment, DataError> {
        let payment = sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(payment)
    }
}
