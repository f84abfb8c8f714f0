//! Message repository for contact, bulk order and newsletter submissions.

use std::str::FromStr;

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use goatique_core::{MessageId, MessageKind};

use super::RepositoryError;
use crate::models::{Message, NewMessage};

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: MessageId,
    kind: String,
    name: Option<String>,
    email: String,
    phone: Option<String>,
    details: Option<String>,
    created_at: NaiveDateTime,
}

impl MessageRow {
    fn into_message(self) -> Result<Message, RepositoryError> {
        let kind = MessageKind::from_str(&self.kind).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "unknown message type '{}' for message {}",
                self.kind, self.id
            ))
        })?;
        let details = match self.details.as_deref() {
            None | Some("") => serde_json::Value::Object(serde_json::Map::new()),
            Some(text) => serde_json::from_str(text).map_err(|e| {
                RepositoryError::DataCorruption(format!(
                    "invalid details JSON for message {}: {e}",
                    self.id
                ))
            })?,
        };

        Ok(Message {
            id: self.id,
            kind,
            name: self.name,
            email: self.email,
            phone: self.phone,
            details,
            created_at: self.created_at,
        })
    }
}

/// Repository for message database operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist an inbound message.
    ///
    /// Missing details are stored as an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, message: &NewMessage) -> Result<MessageId, RepositoryError> {
        let details = message
            .details
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
            .to_string();

        let result = sqlx::query(
            r"
            INSERT INTO messages (type, name, email, phone, details)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(message.kind.to_string())
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&details)
        .execute(self.pool)
        .await?;

        Ok(MessageId::new(result.last_insert_rowid()))
    }

    /// List all messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list(&self) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r"
            SELECT id, type AS kind, name, email, phone, details, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(MessageRow::into_message).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;
    use serde_json::json;

    #[tokio::test]
    async fn create_stores_details_and_list_returns_newest_first() {
        let pool = test_pool().await;
        let repo = MessageRepository::new(&pool);

        repo.create(&NewMessage {
            kind: MessageKind::Contact,
            name: Some("Priya".to_owned()),
            email: "priya@example.com".to_owned(),
            phone: None,
            details: Some(json!({"subject": "Wholesale", "message": "Do you ship to Pune?"})),
        })
        .await
        .unwrap();

        let second = repo
            .create(&NewMessage {
                kind: MessageKind::Newsletter,
                name: None,
                email: "asha@example.com".to_owned(),
                phone: None,
                details: None,
            })
            .await
            .unwrap();

        let messages = repo.list().await.unwrap();
        assert_eq!(messages.len(), 2);

        let newest = messages.first().unwrap();
        assert_eq!(newest.id, second);
        assert_eq!(newest.kind, MessageKind::Newsletter);
        assert_eq!(newest.details, json!({}));

        let oldest = messages.last().unwrap();
        assert_eq!(oldest.details["subject"], "Wholesale");
    }
}
