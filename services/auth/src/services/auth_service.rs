use std::sync::Arc;

use chrono::Utc;
use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use mercato_security::jwt::random_token;
use mercato_security::{hash_password, verify_password, JwtConfig, JwtIssuer, Role};
use tracing::{info, warn};

use crate::models::{
    LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, User, UserRow,
};
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    issuer: Arc<JwtIssuer>,
}

fn unauthorized() -> HttpError {
    HttpError::Unauthorized("Unauthorized".into())
}

impl AuthService {
    pub fn new(users: UserRepository, jwt: JwtConfig) -> Self {
        Self {
            users,
            issuer: Arc::new(JwtIssuer::new(jwt)),
        }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<User, HttpError> {
        let role = req.role.unwrap_or(Role::Customer);
        if role == Role::Admin {
            return Err(HttpError::BadRequest("Cannot self-register as ADMIN".into()));
        }

        let email = req.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(HttpError::Conflict("Email already registered".into()));
        }

        let hash = hash_password(&req.password)?;
        let row = self
            .users
            .insert(&email, &hash, req.full_name.trim(), role)
            .await?;
        info!(user_id = row.id, %role, "User registered");
        Ok(row.into())
    }

    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, HttpError> {
        let email = req.email.trim().to_lowercase();
        let user = match self.users.find_by_email(&email).await? {
            Some(user) if verify_password(&req.password, &user.password_hash) => user,
            _ => {
                warn!(%email, "Login rejected");
                return Err(HttpError::Unauthorized("Invalid email or password".into()));
            }
        };
        info!(user_id = user.id, "User logged in");
        self.issue_pair(&user).await
    }

    /// Exchange a refresh token for a new pair. The presented token is revoked.
    pub async fn refresh(&self, req: RefreshRequest) -> Result<TokenResponse, HttpError> {
        let stored = self
            .users
            .find_refresh_token(&req.refresh_token)
            .await?
            .ok_or_else(unauthorized)?;

        if stored.revoked || stored.expires_at <= Utc::now().timestamp() {
            warn!(user_id = stored.user_id, "Stale refresh token presented");
            return Err(unauthorized());
        }
        // Losing a concurrent rotation means someone else used this token first.
        if !self.users.revoke_refresh_token(&stored.token).await? {
            return Err(unauthorized());
        }

        let user = self
            .users
            .find_by_id(stored.user_id)
            .await?
            .ok_or_else(unauthorized)?;
        self.issue_pair(&user).await
    }

    pub async fn logout(&self, req: RefreshRequest) -> Result<(), HttpError> {
        if self.users.revoke_refresh_token(&req.refresh_token).await? {
            info!("Refresh token revoked");
        }
        Ok(())
    }

    pub async fn get_user(&self, id: i64) -> Result<User, HttpError> {
        self.users
            .find_by_id(id)
            .await?
            .map(User::from)
            .ok_or_else(|| HttpError::NotFound("User not found".into()))
    }

    pub async fn list_users(&self, pageable: &Pageable) -> Result<Page<User>, HttpError> {
        let (rows, total) = self.users.list(pageable).await?;
        Ok(Page::new(rows, pageable, total).map(User::from))
    }

    pub async fn update_role(&self, id: i64, role: Role) -> Result<User, HttpError> {
        let row = self
            .users
            .update_role(id, role)
            .await?
            .ok_or_else(|| HttpError::NotFound("User not found".into()))?;
        info!(user_id = id, %role, "User role changed");
        Ok(row.into())
    }

    async fn issue_pair(&self, user: &UserRow) -> Result<TokenResponse, HttpError> {
        let access = self.issuer.issue(user.id, &user.email, &[user.role()])?;
        let refresh_token = random_token();
        let expires_at = Utc::now().timestamp() + self.issuer.config().refresh_ttl_secs as i64;
        self.users
            .insert_refresh_token(&refresh_token, user.id, expires_at)
            .await?;

        Ok(TokenResponse {
            access_token: access.token,
            token_type: "Bearer".into(),
            expires_in: access.expires_in,
            refresh_token,
        })
    }
}
