//! Inbound message model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use goatique_core::{MessageId, MessageKind};

/// A message submitted through the storefront (contact form, bulk order
/// inquiry or newsletter signup).
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub details: serde_json::Value,
    pub created_at: NaiveDateTime,
}

/// An inbound message as submitted by the storefront client.
///
/// Unknown kinds are rejected at deserialization time, so every stored
/// row carries one of the three known types.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
