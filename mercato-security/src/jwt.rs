use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::JwtConfig;
use crate::error::SecurityError;
use crate::roles::Role;

const LEEWAY_SECS: u64 = 5;

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Signs access tokens. Only the auth service holds one.
pub struct JwtIssuer {
    key: EncodingKey,
    config: JwtConfig,
}

impl JwtIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    pub fn issue(&self, user_id: i64, email: &str, roles: &[Role]) -> Result<IssuedToken, SecurityError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            roles: roles.to_vec(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now,
            exp: now + self.config.access_ttl_secs as i64,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| SecurityError::Signing(e.to_string()))?;
        debug!(sub = %claims.sub, "Access token issued");
        Ok(IssuedToken {
            token,
            expires_in: self.config.access_ttl_secs,
        })
    }
}

/// Validates access tokens: HS256 only, signature, issuer, audience, expiry.
pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256];
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECS;
        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, SecurityError> {
        let header = decode_header(token)
            .map_err(|e| SecurityError::InvalidToken(format!("Failed to decode header: {e}")))?;
        if header.alg != Algorithm::HS256 {
            return Err(SecurityError::ValidationFailed(format!(
                "Disallowed JWT algorithm: {:?}",
                header.alg
            )));
        }

        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            let err = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SecurityError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    SecurityError::ValidationFailed("Invalid issuer".into())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    SecurityError::ValidationFailed("Invalid audience".into())
                }
                _ => SecurityError::InvalidToken(e.to_string()),
            };
            warn!(error = %err, "JWT validation failed");
            err
        })?;

        debug!(sub = %data.claims.sub, "JWT validated");
        Ok(data.claims)
    }
}

/// 32 random bytes, URL-safe base64. Used for opaque refresh tokens.
pub fn random_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
