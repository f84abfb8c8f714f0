//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

/// Database URL from the environment, defaulting to the local file the
/// server uses.
pub(crate) fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:goatique.db".to_owned())
}
