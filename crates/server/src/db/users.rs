//! Admin user repository.
//!
//! The admin console uses a single shared credential, but it lives in a
//! normal users table so further accounts can be added without a schema
//! change.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::AdminUser;

/// Repository for admin user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        let user = sqlx::query_as::<_, AdminUser>(
            r"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// Create a user, or replace the password hash if the username exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn upsert(&self, username: &str, password_hash: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            ON CONFLICT (username) DO UPDATE SET password_hash = excluded.password_hash
            ",
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
