//! Admin user management.
//!
//! # Usage
//!
//! ```bash
//! goatique admin create --username admin --password <password>
//! ```
//!
//! Creates the admin console user, or replaces the stored password hash
//! when the username already exists. Passwords are hashed with Argon2id
//! before they touch the database.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string (default `sqlite:goatique.db`)

use thiserror::Error;

use goatique_server::db::{self, RepositoryError, UserRepository};
use goatique_server::services::auth::{self, AuthError};

/// Errors that can occur during admin user management.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    Hash(#[from] AuthError),
}

/// Create or update an admin user with a freshly hashed password.
///
/// # Errors
///
/// Returns `AdminError` if hashing fails or the database write fails.
pub async fn create_user(username: &str, password: &str) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url();
    tracing::info!(url = %database_url, "Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let password_hash = auth::hash_password(password)?;
    UserRepository::new(&pool).upsert(username, &password_hash).await?;

    tracing::info!(username, "Admin user ready");
    Ok(())
}
