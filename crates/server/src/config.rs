//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Admin token signing secret (min 32 chars, high entropy,
//!   no default)
//!
//! ## Optional
//! - `DATABASE_URL` - `SQLite` connection string (default: sqlite:goatique.db)
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `PUBLIC_BASE_URL` - Public URL used in upload links (default: <http://localhost:3000>)
//! - `FRONTEND_URL` - Storefront origin allowed by CORS with credentials
//! - `UPLOAD_DIR` - Directory for uploaded images (default: uploads)
//! - `STRICT_STATUS_TRANSITIONS` - Reject illegal order status transitions
//!   (default: false)
//! - `SMTP_HOST` - SMTP relay host; email sending is disabled when unset
//! - `SMTP_PORT` - SMTP relay port (default: 587)
//! - `SMTP_USER` - SMTP username (required when `SMTP_HOST` is set)
//! - `SMTP_PASS` - SMTP password (required when `SMTP_HOST` is set)
//! - `SMTP_FROM` - Sender mailbox (default: "SEWA Goatique" <noreply@sewagoatique.com>)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SIGNING_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` connection string
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used when building upload links
    pub public_base_url: String,
    /// Storefront origin allowed by CORS with credentials
    pub frontend_url: Option<String>,
    /// Admin token signing secret
    pub jwt_secret: SecretString,
    /// Directory where uploaded images are stored
    pub upload_dir: PathBuf,
    /// Reject order status transitions the status machine does not allow
    pub strict_status_transitions: bool,
    /// SMTP relay configuration; `None` disables outbound email
    pub smtp: Option<SmtpConfig>,
}

/// SMTP relay configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP relay port
    pub port: u16,
    /// SMTP username
    pub username: String,
    /// SMTP password
    pub password: SecretString,
    /// Sender mailbox for all outbound email
    pub from_address: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the signing secret fails validation (placeholder detection,
    /// entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_env_or_default("DATABASE_URL", "sqlite:goatique.db");
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let public_base_url = get_env_or_default("PUBLIC_BASE_URL", "http://localhost:3000")
            .trim_end_matches('/')
            .to_string();
        let frontend_url = get_optional_env("FRONTEND_URL");

        let jwt_secret = get_validated_secret("JWT_SECRET")?;
        validate_signing_secret(&jwt_secret, "JWT_SECRET")?;

        let upload_dir = PathBuf::from(get_env_or_default("UPLOAD_DIR", "uploads"));
        let strict_status_transitions =
            get_bool_env("STRICT_STATUS_TRANSITIONS", false)?;

        let smtp = SmtpConfig::from_env()?;

        Ok(Self {
            database_url,
            host,
            port,
            public_base_url,
            frontend_url,
            jwt_secret,
            upload_dir,
            strict_status_transitions,
            smtp,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SmtpConfig {
    /// Load SMTP configuration, or `None` when `SMTP_HOST` is unset.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(host) = get_optional_env("SMTP_HOST") else {
            return Ok(None);
        };

        let port = get_env_or_default("SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;
        let username = get_required_env("SMTP_USER")?;
        let password = get_required_secret("SMTP_PASS")?;
        let from_address = get_env_or_default(
            "SMTP_FROM",
            "\"SEWA Goatique\" <noreply@sewagoatique.com>",
        );

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            from_address,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a boolean environment variable with a default value.
fn get_bool_env(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(value) => parse_bool(&value)
            .ok_or_else(|| ConfigError::InvalidEnvVar(key.to_string(), format!("'{value}' is not a boolean"))),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validate that a signing secret meets minimum length requirements.
fn validate_signing_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SIGNING_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SIGNING_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
