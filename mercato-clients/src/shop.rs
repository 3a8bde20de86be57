use mercato_core::{ConfigError, HttpError, MercatoConfig, ServiceClient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopInfo {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct ShopClient {
    inner: ServiceClient,
}

impl ShopClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ServiceClient::from_config("shop", config)?))
    }

    pub async fn get_shop(&self, shop_id: i64) -> Result<ShopInfo, HttpError> {
        self.inner.get(&format!("/internal/shops/{shop_id}")).await
    }
}
