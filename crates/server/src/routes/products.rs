//! Catalog product route handlers.
//!
//! Public reads plus admin CRUD. Deleting a product never touches
//! existing orders; their line item snapshots are denormalized copies.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use goatique_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, AppJson, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Product, ProductDraft};
use crate::state::AppState;

use super::SuccessResponse;

/// Response for product creation.
#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub success: bool,
    pub id: ProductId,
}

/// List the full catalog, newest first.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Look up a single product by slug.
///
/// GET /api/products/:slug
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    match ProductRepository::new(state.pool()).get_by_slug(&slug).await? {
        Some(product) => Ok(Json(product)),
        None => Err(AppError::NotFound("Product not found")),
    }
}

/// Create a product.
///
/// POST /api/products
#[instrument(skip(state, admin, draft), fields(slug = %draft.slug))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(draft): AppJson<ProductDraft>,
) -> Result<Json<ProductCreatedResponse>> {
    let id = ProductRepository::new(state.pool()).create(&draft).await?;
    tracing::info!(admin = %admin.sub, product_id = %id, "Product created");

    Ok(Json(ProductCreatedResponse { success: true, id }))
}

/// Update a product.
///
/// PUT /api/products/:id
#[instrument(skip(state, admin, draft))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(draft): AppJson<ProductDraft>,
) -> Result<Json<SuccessResponse>> {
    let Ok(id) = id.parse::<i64>() else {
        return Err(AppError::Validation("Invalid product id".to_owned()));
    };

    match ProductRepository::new(state.pool())
        .update(ProductId::new(id), &draft)
        .await
    {
        Ok(()) => {
            tracing::info!(admin = %admin.sub, product_id = id, "Product updated");
            Ok(Json(SuccessResponse::ok()))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound("Product not found")),
        Err(err) => Err(err.into()),
    }
}

/// Delete a product.
///
/// DELETE /api/products/:id
///
/// Deleting an id that no longer exists still succeeds; the operation
/// is a no-op in that case.
#[instrument(skip(state, admin))]
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let Ok(id) = id.parse::<i64>() else {
        return Err(AppError::Validation("Invalid product id".to_owned()));
    };

    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    tracing::info!(admin = %admin.sub, product_id = id, "Product deleted");

    Ok(Json(SuccessResponse::ok()))
}
