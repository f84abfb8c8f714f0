//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::email::{EmailError, Mailer, NullMailer, SmtpMailer};
use crate::services::jwt::JwtService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    jwt: JwtService,
    mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds an SMTP mailer when SMTP settings are configured and falls
    /// back to a logging no-op mailer otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be constructed.
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Result<Self, EmailError> {
        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => Arc::new(NullMailer),
        };

        Ok(Self::with_mailer(config, pool, mailer))
    }

    /// Create application state with an explicit mailer implementation.
    #[must_use]
    pub fn with_mailer(config: ServerConfig, pool: SqlitePool, mailer: Arc<dyn Mailer>) -> Self {
        let jwt = JwtService::new(&config.jwt_secret);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                jwt,
                mailer,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn jwt(&self) -> &JwtService {
        &self.inner.jwt
    }

    /// Get a reference to the mailer.
    #[must_use]
    pub fn mailer(&self) -> &Arc<dyn Mailer> {
        &self.inner.mailer
    }
}
