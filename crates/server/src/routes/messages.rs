//! Inbound message route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::instrument;

use crate::db::MessageRepository;
use crate::error::{AppJson, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Message, NewMessage};
use crate::services::email;
use crate::state::AppState;

use super::SuccessResponse;

/// Submit a contact, bulk order or newsletter message.
///
/// POST /api/messages
///
/// Contact and bulk submissions trigger exactly one acknowledgment
/// attempt to the sender; newsletter signups are stored silently. A
/// failed send is logged and never reflected in the response.
#[instrument(skip(state, message), fields(kind = %message.kind, email = %message.email))]
pub async fn create(
    State(state): State<AppState>,
    AppJson(message): AppJson<NewMessage>,
) -> Result<Json<SuccessResponse>> {
    let id = MessageRepository::new(state.pool()).create(&message).await?;
    tracing::info!(message_id = %id, "Message stored");

    if message.kind.sends_acknowledgment() {
        let mailer = Arc::clone(state.mailer());
        let content = email::inquiry_acknowledgment(message.kind, message.name.as_deref());
        let to = message.email;
        tokio::spawn(async move {
            if let Err(err) = mailer.send(&to, &content).await {
                tracing::warn!(message_id = %id, error = %err, "Failed to send acknowledgment");
            }
        });
    }

    Ok(Json(SuccessResponse::ok()))
}

/// List all messages, newest first.
///
/// GET /api/messages
#[instrument(skip(state, _admin))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>> {
    let messages = MessageRepository::new(state.pool()).list().await?;
    Ok(Json(messages))
}
