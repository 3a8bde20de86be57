use chrono::Utc;
use mercato_clients::{CartView, OrderStatus};
use mercato_data::{DataError, Pageable};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::{Order, OrderItem, OrderRow};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

/// Restrict a listing to one owner and/or one status.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderScope {
    pub user_id: Option<i64>,
    pub status: Option<OrderStatus>,
}

fn push_scope(qb: &mut QueryBuilder<'_, Sqlite>, scope: OrderScope) {
    qb.push(" WHERE 1 = 1");
    if let Some(user_id) = scope.user_id {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(status) = scope.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn hydrate(&self, row: OrderRow) -> Result<Order, DataError> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|e| DataError::Database(e.into()))?;
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT product_id, product_name, unit_price, quantity, line_total \
             FROM order_items WHERE order_id = ? ORDER BY id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            status,
            subtotal: row.subtotal,
            discount: row.discount,
            total: row.total,
            promo_code: row.promo_code,
            shipping_address: row.shipping_address,
            items,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Order>, DataError> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn list(
        &self,
        scope: OrderScope,
        pageable: &Pageable,
    ) -> Result<(Vec<Order>, u64), DataError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM orders");
        push_scope(&mut qb, scope);
        qb.push(" ORDER BY id DESC LIMIT ")
            .push_bind(pageable.limit() as i64)
            .push(" OFFSET ")
            .push_bind(pageable.offset() as i64);
        let rows = qb.build_query_as::<OrderRow>().fetch_all(&self.pool).await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM orders");
        push_scope(&mut count, scope);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }
        Ok((orders, total as u64))
    }

    /// Insert a PENDING order and its lines from the cart in one transaction.
    pub async fn insert_from_cart(
        &self,
        cart: &CartView,
        shipping_address: &str,
    ) -> Result<i64, DataError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let (order_id,): (i64,) = sqlx::query_as(
            "INSERT INTO orders (user_id, status, subtotal, discount, total, promo_code, \
             shipping_address, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(cart.user_id)
        .bind(OrderStatus::Pending.as_str())
        .bind(cart.subtotal)
        .bind(cart.discount)
        .bind(cart.total)
        .bind(&cart.promo_code)
        .bind(shipping_address)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for line in &cart.items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, product_name, unit_price, quantity, line_total) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.unit_price)
            .bind(line.quantity)
            .bind(line.line_total)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(order_id)
    }

    /// Move `id` from `from` to `to`. Returns `false` if the status changed underneath.
    pub async fn update_status(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, DataError> {
        let result = sqlx::query(
            "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(to.as_str())
        .bind(Utc::now())
        .bind(id)
        .bind(from.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
