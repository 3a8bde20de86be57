use chrono::Utc;
use mercato_data::DataError;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::{CartItemRow, CartRow};

#[derive(Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

/// Any change to the lines invalidates a discount computed on the old contents.
async fn drop_promotion(tx: &mut Transaction<'_, Sqlite>, user_id: i64) -> Result<(), DataError> {
    sqlx::query("UPDATE carts SET promo_code = NULL, discount = 0, updated_at = ? WHERE user_id = ?")
        .bind(Utc::now())
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn items(&self, user_id: i64) -> Result<Vec<CartItemRow>, DataError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT product_id, product_name, unit_price, quantity FROM cart_items \
             WHERE user_id = ? ORDER BY product_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn item(&self, user_id: i64, product_id: i64) -> Result<Option<CartItemRow>, DataError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            "SELECT product_id, product_name, unit_price, quantity FROM cart_items \
             WHERE user_id = ? AND product_id = ?",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn cart(&self, user_id: i64) -> Result<Option<CartRow>, DataError> {
        let row = sqlx::query_as::<_, CartRow>("SELECT promo_code, discount FROM carts WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert or replace a line, refreshing its name and price.
    pub async fn upsert_item(&self, user_id: i64, item: &CartItemRow) -> Result<(), DataError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO carts (user_id, discount, updated_at) VALUES (?, 0, ?) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "INSERT INTO cart_items (user_id, product_id, product_name, unit_price, quantity) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, product_id) DO UPDATE SET \
             product_name = excluded.product_name, unit_price = excluded.unit_price, quantity = excluded.quantity",
        )
        .bind(user_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.unit_price)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;
        drop_promotion(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Returns `false` when the line did not exist.
    pub async fn remove_item(&self, user_id: i64, product_id: i64) -> Result<bool, DataError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ? AND product_id = ?")
            .bind(user_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        drop_promotion(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn clear(&self, user_id: i64) -> Result<(), DataError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM carts WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn set_promotion(&self, user_id: i64, code: &str, discount: f64) -> Result<(), DataError> {
        sqlx::query("UPDATE carts SET promo_code = ?, discount = ?, updated_at = ? WHERE user_id = ?")
            .bind(code)
            .bind(discount)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear_promotion(&self, user_id: i64) -> Result<(), DataError> {
        let mut tx = self.pool.begin().await?;
        drop_promotion(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(())
    }
}
