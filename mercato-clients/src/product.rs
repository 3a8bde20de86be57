use mercato_core::{ConfigError, HttpError, MercatoConfig, ServiceClient};
use serde::{Deserialize, Serialize};

/// The subset of a product other services rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub product_id: i64,
    pub available: bool,
    pub stock: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockChange {
    pub quantity: i64,
}

#[derive(Clone, Debug)]
pub struct ProductClient {
    inner: ServiceClient,
}

impl ProductClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ServiceClient::from_config("product", config)?))
    }

    pub async fn get_product(&self, product_id: i64) -> Result<ProductInfo, HttpError> {
        self.inner.get(&format!("/products/{product_id}")).await
    }

    pub async fn check_availability(
        &self,
        product_id: i64,
        quantity: i64,
    ) -> Result<Availability, HttpError> {
        self.inner
            .get_with_query(
                &format!("/internal/products/{product_id}/availability"),
                &[("quantity", quantity)],
            )
            .await
    }

    /// Atomically take `quantity` units; 409 when stock is insufficient.
    pub async fn decrease_stock(&self, product_id: i64, quantity: i64) -> Result<(), HttpError> {
        self.inner
            .post_discard(
                &format!("/internal/products/{product_id}/stock/decrease"),
                &StockChange { quantity },
            )
            .await
    }

    pub async fn increase_stock(&self, product_id: i64, quantity: i64) -> Result<(), HttpError> {
        self.inner
            .post_discard(
                &format!("/internal/products/{product_id}/stock/increase"),
                &StockChange { quantity },
            )
            .await
    }
}
