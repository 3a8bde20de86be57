use chrono::Utc;
use mercato_data::{DataError, Pageable};
use mercato_security::Role;
use sqlx::SqlitePool;

use crate::models::{RefreshTokenRow, UserRow};

const USER_COLUMNS: &str = "id, email, password_hash, full_name, role, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserRow>, DataError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, DataError> {
        let row =
            sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
        role: Role,
    ) -> Result<UserRow, DataError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, password_hash, full_name, role, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .bind(role.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<(Vec<UserRow>, u64), DataError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(pageable.limit() as i64)
        .bind(pageable.offset() as i64)
        .fetch_all(&self.pool)
        .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows, total as u64))
    }

    pub async fn update_role(&self, id: i64, role: Role) -> Result<Option<UserRow>, DataError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET role = ? WHERE id = ? RETURNING {USER_COLUMNS}"
        ))
        .bind(role.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: i64,
        expires_at: i64,
    ) -> Result<(), DataError> {
        sqlx::query("INSERT INTO refresh_tokens (token, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRow>, DataError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT token, user_id, expires_at, revoked FROM refresh_tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Revoke a live token. Returns `false` when it was unknown or already revoked.
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<bool, DataError> {
        let result =
            sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE token = ? AND revoked = 0")
                .bind(token)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() == 1)
    }
}
