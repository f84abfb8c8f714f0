//! Integration tests for Goatique.
//!
//! Each test boots the full HTTP stack: an in-memory `SQLite` database
//! with all migrations applied, application state with a test mailer,
//! and an axum server on an ephemeral port. Requests go over real HTTP
//! with reqwest, so routing, extractors, middleware and serialization
//! are all exercised.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p goatique-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Product, content and blog post endpoints
//! - `orders` - Order placement, tracking and snapshots
//! - `order_status` - Status machine and strict transition mode
//! - `messages` - Inbound messages and acknowledgment email
//! - `admin_console` - Login, route guards and uploads

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test support code panics with context on setup failure.
#![allow(clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use goatique_server::config::ServerConfig;
use goatique_server::db::{self, UserRepository};
use goatique_server::routes;
use goatique_server::services::auth;
use goatique_server::services::email::{EmailContent, EmailError, Mailer, NullMailer};
use goatique_server::state::AppState;

/// Password used for the provisioned test admin.
pub const ADMIN_PASSWORD: &str = "goat-keeper-9000";

/// A running test server and the handles tests need to drive it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
}

impl TestContext {
    /// Boot a server with a fresh database and a no-op mailer.
    pub async fn new() -> Self {
        Self::start(Arc::new(NullMailer), false).await
    }

    /// Boot a server that hands all outbound email to `mailer`.
    pub async fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self::start(mailer, false).await
    }

    /// Boot a server with strict order status transitions enabled.
    pub async fn with_strict_transitions() -> Self {
        Self::start(Arc::new(NullMailer), true).await
    }

    async fn start(mailer: Arc<dyn Mailer>, strict_status_transitions: bool) -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        db::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let upload_dir =
            std::env::temp_dir().join(format!("goatique-test-uploads-{}", Uuid::new_v4()));
        let config = ServerConfig {
            database_url: "sqlite::memory:".to_owned(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            public_base_url: "http://localhost:3000".to_owned(),
            frontend_url: None,
            jwt_secret: SecretString::from("kX9mQ2vR7pL4wN8jT3bY6hF1dS5gZ0cE"),
            upload_dir: upload_dir.clone(),
            strict_status_transitions,
            smtp: None,
        };

        let state = AppState::with_mailer(config, pool.clone(), mailer);
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read listener address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server crashed");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            pool,
            upload_dir,
        }
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Create the `admin` user directly in the database.
    pub async fn provision_admin(&self) {
        let hash = auth::hash_password(ADMIN_PASSWORD).expect("Failed to hash admin password");
        UserRepository::new(&self.pool)
            .upsert("admin", &hash)
            .await
            .expect("Failed to provision admin user");
    }

    /// Provision the admin user and log in, returning a bearer token.
    pub async fn admin_token(&self) -> String {
        self.provision_admin().await;

        let resp = self
            .client
            .post(self.url("/api/admin/login"))
            .json(&serde_json::json!({"username": "admin", "password": ADMIN_PASSWORD}))
            .send()
            .await
            .expect("Failed to log in");
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "Admin login failed");

        let body: serde_json::Value = resp.json().await.expect("Failed to parse login response");
        body.get("token")
            .and_then(serde_json::Value::as_str)
            .expect("Login response missing token")
            .to_owned()
    }
}

/// Poll until `predicate` holds, panicking after two seconds.
///
/// Used to observe work the server dispatched onto the runtime without
/// awaiting it, like confirmation email sends.
pub async fn wait_for(predicate: impl Fn() -> bool, what: &str) {
    for _ in 0..100 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("Timed out waiting for {what}");
}

/// One email captured by [`RecordingMailer`].
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub content: EmailContent,
}

/// Mailer that records every send and reports success.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, content: &EmailContent) -> Result<(), EmailError> {
        self.sent.lock().expect("mailer lock poisoned").push(SentEmail {
            to: to.to_owned(),
            content: content.clone(),
        });
        Ok(())
    }
}

/// Mailer that fails every send, counting attempts.
#[derive(Default)]
pub struct FailingMailer {
    attempts: AtomicUsize,
}

impl FailingMailer {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of sends attempted so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, to: &str, _content: &EmailContent) -> Result<(), EmailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(EmailError::InvalidAddress(to.to_owned()))
    }
}
