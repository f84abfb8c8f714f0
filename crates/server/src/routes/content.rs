//! Site content route handlers.
//!
//! The content store is a key to JSON-value table used for editable page
//! fragments (homepage hero, branding). Reads are public and total: an
//! unknown key answers `{}` rather than 404 so clients can render
//! defaults without special-casing.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use crate::db::ContentRepository;
use crate::error::{AppJson, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::SuccessResponse;

/// Request body for a content upsert.
#[derive(Debug, Deserialize)]
pub struct ContentBody {
    pub value: serde_json::Value,
}

/// Fetch the stored value for a content key.
///
/// GET /api/content/:key
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let value = ContentRepository::new(state.pool()).get(&key).await?;
    Ok(Json(value.unwrap_or_else(|| serde_json::json!({}))))
}

/// Insert or replace the value for a content key.
///
/// POST /api/content/:key
#[instrument(skip(state, admin, body))]
pub async fn upsert(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    AppJson(body): AppJson<ContentBody>,
) -> Result<Json<SuccessResponse>> {
    ContentRepository::new(state.pool())
        .upsert(&key, &body.value)
        .await?;
    tracing::info!(admin = %admin.sub, key = %key, "Content updated");

    Ok(Json(SuccessResponse::ok()))
}
