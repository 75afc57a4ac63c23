// Database repositories for users and revoked tokens

use axum::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::auth::{error::AuthError, models::User};
use crate::error::is_unique_violation;

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

/// Fields stored for a new user; secrets arrive already hashed
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub security_question: &'a str,
    pub security_answer_hash: &'a str,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// A unique violation on email maps to `EmailAlreadyExists`, which covers
    /// two registrations racing past the existence pre-check.
    pub async fn create_user(&self, user: NewUser<'_>) -> Result<User, AuthError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, security_question, security_answer_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, security_question, security_answer_hash, created_at
            "#,
        )
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.security_question)
        .bind(user.security_answer_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailAlreadyExists
            } else {
                AuthError::from(e)
            }
        })
    }

    /// Find a user by email (exact match)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, security_question, security_answer_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, security_question, security_answer_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if an email exists
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }

    /// Replace a user's password hash
    pub async fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Append-only store of revoked tokens; entries are never removed
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    /// Record a token as revoked; revoking twice is not an error
    async fn revoke(&self, token: &str) -> Result<(), AuthError>;

    /// True if the token has been revoked
    async fn is_revoked(&self, token: &str) -> Result<bool, AuthError>;
}

/// Hash a token using SHA-256; only digests are stored
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// PostgreSQL-backed token blacklist
#[derive(Clone)]
pub struct BlacklistRepository {
    pool: PgPool,
}

impl BlacklistRepository {
    /// Create a new BlacklistRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenBlacklist for BlacklistRepository {
    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        sqlx::query(
            "INSERT INTO blacklisted_tokens (token_hash) VALUES ($1) ON CONFLICT (token_hash) DO NOTHING",
        )
        .bind(hash_token(token))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM blacklisted_tokens WHERE token_hash = $1)")
                .bind(hash_token(token))
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }
}

/// In-memory blacklist for exercising the gate without a database
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryBlacklist {
    revoked: std::sync::Mutex<std::collections::HashSet<String>>,
}

#[cfg(test)]
#[async_trait]
impl TokenBlacklist for InMemoryBlacklist {
    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        self.revoked.lock().unwrap().insert(hash_token(token));
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, AuthError> {
        Ok(self.revoked.lock().unwrap().contains(&hash_token(token)))
    }
}
