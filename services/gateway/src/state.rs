use std::sync::Arc;

use mercato_core::{BoxError, MercatoConfig};
use mercato_security::{JwtConfig, JwtValidator};
use tracing::info;

use crate::proxy::Proxy;
use crate::public::PublicPaths;
use crate::routes::RouteTable;

#[derive(Clone)]
pub struct GatewayState {
    pub routes: Arc<RouteTable>,
    pub public: Arc<PublicPaths>,
    pub validator: Arc<JwtValidator>,
    pub proxy: Proxy,
}

impl GatewayState {
    pub fn new(routes: RouteTable, public: PublicPaths, jwt: &JwtConfig, proxy: Proxy) -> Self {
        Self {
            routes: Arc::new(routes),
            public: Arc::new(public),
            validator: Arc::new(JwtValidator::new(jwt)),
            proxy,
        }
    }

    pub fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let public = PublicPaths::from_config(config)?;
        info!(public_rules = public.len(), "Gateway routes loaded");
        Ok(Self::new(
            RouteTable::from_config(config)?,
            public,
            &JwtConfig::from_config(config)?,
            Proxy::from_config(config)?,
        ))
    }
}
