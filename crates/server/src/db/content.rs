//! Content repository.
//!
//! Stores editable site content as JSON documents keyed by name
//! (`homepage_hero`, `site_branding`, ...).

use sqlx::SqlitePool;

use super::RepositoryError;

/// Repository for site content documents.
pub struct ContentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a content document by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored value is not
    /// valid JSON.
    pub async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("SELECT value FROM content WHERE key = ?")
                .bind(key)
                .fetch_optional(self.pool)
                .await?;

        match value.flatten() {
            Some(text) => {
                let doc = serde_json::from_str(&text).map_err(|e| {
                    RepositoryError::DataCorruption(format!(
                        "invalid content JSON for key '{key}': {e}"
                    ))
                })?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Insert or replace a content document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn upsert(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR REPLACE INTO content (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value.to_string())
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let pool = test_pool().await;
        let repo = ContentRepository::new(&pool);

        let hero = json!({"headline": "Pure. Ethical. Empowering.", "cta_text": "Shop Now"});
        repo.upsert("homepage_hero", &hero).await.unwrap();
        assert_eq!(repo.get("homepage_hero").await.unwrap(), Some(hero));

        let replaced = json!({"headline": "New headline"});
        repo.upsert("homepage_hero", &replaced).await.unwrap();
        assert_eq!(repo.get("homepage_hero").await.unwrap(), Some(replaced));
    }

    #[tokio::test]
    async fn missing_key_returns_none() {
        let pool = test_pool().await;
        let repo = ContentRepository::new(&pool);

        assert!(repo.get("no_such_key").await.unwrap().is_none());
    }
}
