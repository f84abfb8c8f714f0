//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! goatique migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string (default `sqlite:goatique.db`)

use thiserror::Error;

use goatique_server::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply the embedded migrations to the configured database.
///
/// The database file is created when missing.
///
/// # Errors
///
/// Returns `MigrationError` if the connection cannot be opened or a
/// migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url();
    tracing::info!(url = %database_url, "Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
