//! Blog post route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use goatique_core::PostId;

use crate::db::{PostRepository, RepositoryError};
use crate::error::{AppError, AppJson, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Post, PostDraft};
use crate::state::AppState;

use super::SuccessResponse;

/// Response for post creation.
#[derive(Debug, Serialize)]
pub struct PostCreatedResponse {
    pub success: bool,
    pub id: PostId,
}

/// List all posts, newest first.
///
/// GET /api/posts
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Post>>> {
    let posts = PostRepository::new(state.pool()).list().await?;
    Ok(Json(posts))
}

/// Look up a single post by slug.
///
/// GET /api/posts/:slug
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Post>> {
    match PostRepository::new(state.pool()).get_by_slug(&slug).await? {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::NotFound("Post not found")),
    }
}

/// Create a post.
///
/// POST /api/posts
#[instrument(skip(state, admin, draft), fields(slug = %draft.slug))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(draft): AppJson<PostDraft>,
) -> Result<Json<PostCreatedResponse>> {
    let id = PostRepository::new(state.pool()).create(&draft).await?;
    tracing::info!(admin = %admin.sub, post_id = %id, "Post created");

    Ok(Json(PostCreatedResponse { success: true, id }))
}

/// Update a post.
///
/// PUT /api/posts/:id
#[instrument(skip(state, admin, draft))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(draft): AppJson<PostDraft>,
) -> Result<Json<SuccessResponse>> {
    let Ok(id) = id.parse::<i64>() else {
        return Err(AppError::Validation("Invalid post id".to_owned()));
    };

    match PostRepository::new(state.pool())
        .update(PostId::new(id), &draft)
        .await
    {
        Ok(()) => {
            tracing::info!(admin = %admin.sub, post_id = id, "Post updated");
            Ok(Json(SuccessResponse::ok()))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound("Post not found")),
        Err(err) => Err(err.into()),
    }
}

/// Delete a post.
///
/// DELETE /api/posts/:id
#[instrument(skip(state, admin))]
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let Ok(id) = id.parse::<i64>() else {
        return Err(AppError::Validation("Invalid post id".to_owned()));
    };

    PostRepository::new(state.pool())
        .delete(PostId::new(id))
        .await?;
    tracing::info!(admin = %admin.sub, post_id = id, "Post deleted");

    Ok(Json(SuccessResponse::ok()))
}
