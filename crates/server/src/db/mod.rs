//! Database operations for the Goatique `SQLite` store.
//!
//! # Tables
//!
//! - `products` - Catalog
//! - `orders` - Orders with denormalized item snapshots
//! - `messages` - Contact, bulk order and newsletter submissions
//! - `content` - Editable site content (JSON documents keyed by name)
//! - `posts` - Blog posts
//! - `users` - Admin console users
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p goatique-cli -- migrate
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub mod content;
pub mod messages;
pub mod orders;
pub mod posts;
pub mod products;
pub mod users;

pub use content::ContentRepository;
pub use messages::MessageRepository;
pub use orders::OrderRepository;
pub use posts::PostRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Embedded migrations, shared with the CLI.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Whether this error is a unique constraint conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Map a sqlx error to `Conflict` when it is a unique constraint violation.
pub(crate) fn map_unique_violation(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing. WAL mode matches what the
/// storefront expects for concurrent readers during admin writes.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection fails.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory database with all migrations applied.
    ///
    /// A single connection keeps the schema visible across queries.
    #[allow(clippy::unwrap_used)]
    pub(crate) async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        super::MIGRATOR.run(&pool).await.unwrap();
        pool
    }
}
