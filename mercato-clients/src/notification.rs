use mercato_core::{ConfigError, HttpError, MercatoConfig, ServiceClient};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    OrderCreated,
    OrderStatusChanged,
    PaymentCompleted,
    PaymentRefunded,
    General,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OrderCreated => "ORDER_CREATED",
            NotificationKind::OrderStatusChanged => "ORDER_STATUS_CHANGED",
            NotificationKind::PaymentCompleted => "PAYMENT_COMPLETED",
            NotificationKind::PaymentRefunded => "PAYMENT_REFUNDED",
            NotificationKind::General => "GENERAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl NotificationRequest {
    pub fn new(
        user_id: i64,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NotificationClient {
    inner: ServiceClient,
}

impl NotificationClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ServiceClient::from_config("notification", config)?))
    }

    pub async fn send(&self, request: &NotificationRequest) -> Result<(), HttpError> {
        self.inner.post_discard("/internal/notifications", request).await
    }

    /// Send and forget: failures are logged, never returned.
    pub async fn notify(&self, request: NotificationRequest) {
        if let Err(e) = self.send(&request).await {
            warn!(
                user_id = request.user_id,
                kind = request.kind.as_str(),
                error = %e,
                "Notification not delivered"
            );
        }
    }
}
