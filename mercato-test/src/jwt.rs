use mercato_security::{JwtConfig, JwtIssuer, Role};

/// Signs access tokens with a fixed test secret.
pub struct TestJwt {
    config: JwtConfig,
    issuer: JwtIssuer,
}

impl TestJwt {
    pub const SECRET: &'static str = "mercato-test-secret-0123456789abcdef";

    pub fn new() -> Self {
        Self::with_config(JwtConfig::new(Self::SECRET))
    }

    pub fn with_config(config: JwtConfig) -> Self {
        Self {
            issuer: JwtIssuer::new(config.clone()),
            config,
        }
    }

    /// Config a validator must use to accept these tokens.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    pub fn token(&self, user_id: i64, email: &str, roles: &[Role]) -> String {
        self.issuer
            .issue(user_id, email, roles)
            .expect("failed to sign test token")
            .token
    }

    pub fn customer(&self, user_id: i64) -> String {
        self.token(user_id, &format!("user{user_id}@example.com"), &[Role::Customer])
    }

    pub fn admin(&self, user_id: i64) -> String {
        self.token(user_id, &format!("admin{user_id}@example.com"), &[Role::Admin])
    }
}

impl Default for TestJwt {
    fn default() -> Self {
        Self::new()
    }
}
