use mercato_core::{ConfigError, HttpError, MercatoConfig, ServiceClient};
use serde::{Deserialize, Serialize};

use crate::money::round_cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// A user's cart with its applied promotion, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub user_id: i64,
    pub items: Vec<CartLine>,
    pub subtotal: f64,
    pub promo_code: Option<String>,
    pub discount: f64,
    pub total: f64,
}

impl CartLine {
    pub fn new(product_id: i64, product_name: String, unit_price: f64, quantity: i64) -> Self {
        Self {
            product_id,
            product_name,
            unit_price,
            quantity,
            line_total: round_cents(unit_price * quantity as f64),
        }
    }
}

impl CartView {
    /// Compute totals. The discount is capped at the subtotal.
    pub fn new(user_id: i64, items: Vec<CartLine>, promo_code: Option<String>, discount: f64) -> Self {
        let subtotal = round_cents(items.iter().map(|l| l.line_total).sum());
        let discount = round_cents(discount.clamp(0.0, subtotal));
        Self {
            user_id,
            items,
            subtotal,
            promo_code,
            discount,
            total: round_cents(subtotal - discount),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyPromotion {
    pub promo_code: String,
    pub discount: f64,
}

#[derive(Clone, Debug)]
pub struct CartClient {
    inner: ServiceClient,
}

impl CartClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ServiceClient::from_config("cart", config)?))
    }

    pub async fn get_cart(&self, user_id: i64) -> Result<CartView, HttpError> {
        self.inner.get(&format!("/internal/carts/{user_id}")).await
    }

    pub async fn apply_promotion(
        &self,
        user_id: i64,
        promo_code: &str,
        discount: f64,
    ) -> Result<CartView, HttpError> {
        let body = ApplyPromotion {
            promo_code: promo_code.to_string(),
            discount,
        };
        self.inner
            .put(&format!("/internal/carts/{user_id}/promotion"), &body)
            .await
    }

    pub async fn clear_promotion(&self, user_id: i64) -> Result<(), HttpError> {
        self.inner
            .delete(&format!("/internal/carts/{user_id}/promotion"))
            .await
    }

    pub async fn clear_cart(&self, user_id: i64) -> Result<(), HttpError> {
        self.inner.delete(&format!("/internal/carts/{user_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_discount_cap() {
        let items = vec![
            CartLine::new(1, "Mug".into(), 3.35, 3),
            CartLine::new(2, "Teapot".into(), 20.0, 1),
        ];
        let view = CartView::new(7, items, Some("BIG".into()), 500.0);
        assert_eq!(view.items[0].line_total, 10.05);
        assert_eq!(view.subtotal, 30.05);
        assert_eq!(view.discount, 30.05);
        assert_eq!(view.total, 0.0);
    }
}
