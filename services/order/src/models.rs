use chrono::{DateTime, Utc};
use garde::Validate;
use mercato_clients::OrderStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub promo_code: Option<String>,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub promo_code: Option<String>,
    pub shipping_address: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[garde(length(min = 5, max = 500))]
    pub shipping_address: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StatusRequest {
    #[garde(skip)]
    pub status: OrderStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}
