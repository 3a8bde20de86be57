use garde::Validate;
use serde::Deserialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItemRow {
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartRow {
    pub promo_code: Option<String>,
    pub discount: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    #[garde(range(min = 1))]
    pub product_id: i64,
    #[garde(range(min = 1, max = 1000))]
    pub quantity: i64,
}

/// A quantity of 0 removes the line.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[garde(range(min = 0, max = 1000))]
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PromotionRequest {
    #[garde(length(min = 1, max = 50))]
    pub promo_code: String,
    #[garde(range(min = 0.0))]
    pub discount: f64,
}
