use chrono::Utc;
use mercato_data::{DataError, Pageable};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::{Product, ProductDetails, ProductFilter};

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ProductFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(shop_id) = filter.shop_id {
        qb.push(" AND shop_id = ").push_bind(shop_id);
    }
    if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        qb.push(" AND LOWER(name) LIKE ")
            .push_bind(format!("%{}%", q.to_lowercase()));
    }
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DataError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn search(
        &self,
        filter: &ProductFilter,
        pageable: &Pageable,
    ) -> Result<(Vec<Product>, u64), DataError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM products");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id LIMIT ")
            .push_bind(pageable.limit() as i64)
            .push(" OFFSET ")
            .push_bind(pageable.offset() as i64);
        let products = qb.build_query_as::<Product>().fetch_all(&self.pool).await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut count, filter);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;
        Ok((products, total as u64))
    }

    pub async fn insert(&self, shop_id: i64, details: &ProductDetails) -> Result<Product, DataError> {
        let now = Utc::now();
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (shop_id, name, description, category, price, stock, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(shop_id)
        .bind(details.name.trim())
        .bind(&details.description)
        .bind(details.category.trim())
        .bind(details.price)
        .bind(details.stock)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update(&self, id: i64, details: &ProductDetails) -> Result<Product, DataError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = ?, description = ?, category = ?, price = ?, stock = ?, updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(details.name.trim())
        .bind(&details.description)
        .bind(details.category.trim())
        .bind(details.price)
        .bind(details.stock)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DataError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Take `quantity` units in a single conditional statement.
    /// Returns `false` when the product is missing or short on stock.
    pub async fn decrease_stock(&self, id: i64, quantity: i64) -> Result<bool, DataError> {
        let result = sqlx::query(
            "UPDATE products SET stock = stock - ?, updated_at = ? WHERE id = ? AND stock >= ?",
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn increase_stock(&self, id: i64, quantity: i64) -> Result<bool, DataError> {
        let result = sqlx::query("UPDATE products SET stock = stock + ?, updated_at = ? WHERE id = ?")
            .bind(quantity)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
