use axum::extract::FromRef;
use mercato_core::{BoxError, MercatoConfig};
use mercato_security::JwtConfig;
use sqlx::SqlitePool;

use crate::repository::UserRepository;
use crate::services::AuthService;

#[derive(Clone, FromRef)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub pool: SqlitePool,
}

impl AuthState {
    pub fn new(pool: SqlitePool, jwt: JwtConfig) -> Self {
        let users = UserRepository::new(pool.clone());
        Self {
            auth_service: AuthService::new(users, jwt),
            pool,
        }
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let jwt = JwtConfig::from_config(config)?;
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://auth.db", crate::SCHEMA)
                .await?;
        Ok(Self::new(pool, jwt))
    }
}
