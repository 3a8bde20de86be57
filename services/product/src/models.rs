use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[garde(range(min = 1))]
    pub shop_id: i64,
    #[garde(dive)]
    #[serde(flatten)]
    pub details: ProductDetails,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProductDetails {
    #[garde(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[garde(length(max = 5000))]
    pub description: String,
    #[garde(length(min = 1, max = 100))]
    pub category: String,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(range(min = 0))]
    pub stock: i64,
}

/// `GET /products` filters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub shop_id: Option<i64>,
    /// Case-insensitive name substring.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default = "one")]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}
