use mercato_core::config::{ConfigError, MercatoConfig};

const DEFAULT_ISSUER: &str = "mercato-auth";
const DEFAULT_AUDIENCE: &str = "mercato";
const DEFAULT_ACCESS_TTL_SECS: u64 = 15 * 60;
const DEFAULT_REFRESH_TTL_SECS: u64 = 7 * 24 * 3600;

/// JWT settings shared by the auth service (issuing) and the gateway (validating).
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HMAC secret for HS256.
    pub secret: String,
    /// Expected issuer in the "iss" claim.
    pub issuer: String,
    /// Expected audience in the "aud" claim.
    pub audience: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
        }
    }

    /// Read `security.jwt.*`. The secret is mandatory.
    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            secret: config.get("security.jwt.secret")?,
            issuer: config.get_or("security.jwt.issuer", DEFAULT_ISSUER.to_string()),
            audience: config.get_or("security.jwt.audience", DEFAULT_AUDIENCE.to_string()),
            access_ttl_secs: config.get_or("security.jwt.access.ttl", DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl_secs: config.get_or("security.jwt.refresh.ttl", DEFAULT_REFRESH_TTL_SECS),
        })
    }

    pub fn with_access_ttl(mut self, secs: u64) -> Self {
        self.access_ttl_secs = secs;
        self
    }
}
