//! Image upload route handler.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Response for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Store a multipart image upload.
///
/// POST /api/upload
///
/// Expects a multipart form with an `image` field. The file lands in the
/// configured upload directory under a collision-free name derived from
/// the submission time and the original file name; the response carries
/// the public URL it will be served from.
#[instrument(skip(state, admin, multipart))]
pub async fn store(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Validation(err.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original = field.file_name().unwrap_or("upload").to_owned();
        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::Validation(err.to_string()))?;

        let file_name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            sanitize_file_name(&original)
        );

        let dir = state.config().upload_dir.clone();
        tokio::fs::create_dir_all(&dir).await.map_err(|err| {
            AppError::Internal(format!("Failed to create upload directory: {err}"))
        })?;
        tokio::fs::write(dir.join(&file_name), &data)
            .await
            .map_err(|err| AppError::Internal(format!("Failed to store upload: {err}")))?;

        tracing::info!(admin = %admin.sub, file = %file_name, size = data.len(), "Upload stored");
        return Ok(Json(UploadResponse {
            url: format!("{}/uploads/{}", state.config().public_base_url, file_name),
        }));
    }

    Err(AppError::Validation("No file uploaded".to_owned()))
}

/// Restrict a client-supplied file name to one safe path segment.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_owned()
    } else {
        cleaned
    }
}
