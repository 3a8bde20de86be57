use std::fmt;
use std::str::FromStr;

use mercato_core::{ConfigError, HttpError, MercatoConfig, ServiceClient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// PENDING -> PAID | CANCELLED, PAID -> SHIPPED | CANCELLED, SHIPPED -> DELIVERED.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid) | (Pending, Cancelled) | (Paid, Shipped) | (Paid, Cancelled) | (Shipped, Delivered)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "PAID" => Ok(OrderStatus::Paid),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Unknown order status: {other}")),
        }
    }
}

/// Order summary as seen by other services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub promo_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[derive(Clone, Debug)]
pub struct OrderClient {
    inner: ServiceClient,
}

impl OrderClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ServiceClient::from_config("order", config)?))
    }

    pub async fn get_order(&self, order_id: i64) -> Result<OrderView, HttpError> {
        self.inner.get(&format!("/internal/orders/{order_id}")).await
    }

    pub async fn update_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<OrderView, HttpError> {
        self.inner
            .put(
                &format!("/internal/orders/{order_id}/status"),
                &StatusUpdate { status },
            )
            .await
    }
}
