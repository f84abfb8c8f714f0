//! Order route handlers.
//!
//! `place` is the write path of the order pipeline: validate the
//! submitted cart and contact fields, persist a pending order with its
//! frozen line item snapshot, then dispatch the confirmation email
//! without awaiting it. `track` is the public lookup with derived
//! milestones.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use goatique_core::snapshot::{CartSnapshot, LineItem};
use goatique_core::{Milestone, OrderId, OrderStatus};

use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, AppJson, Result};
use crate::middleware::RequireAdmin;
use crate::models::{NewOrder, Order};
use crate::services::email;
use crate::state::AppState;

use super::SuccessResponse;

/// Checkout payload submitted by the storefront client.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    pub total_amount: f64,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Response for order placement.
#[derive(Debug, Serialize)]
pub struct OrderPlacedResponse {
    pub success: bool,
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

/// Request body for a status update.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Tracking view of an order: the stored row plus derived milestones.
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    #[serde(flatten)]
    pub order: Order,
    pub milestones: Vec<Milestone>,
}

/// Place an order.
///
/// POST /api/orders
///
/// The submitted line items are frozen into the order row as a
/// versioned snapshot; later catalog edits never change them. The
/// confirmation email is dispatched onto the runtime and its outcome
/// cannot affect the response.
#[instrument(skip(state, request), fields(email = %request.customer_email))]
pub async fn place(
    State(state): State<AppState>,
    AppJson(request): AppJson<PlaceOrderRequest>,
) -> Result<Json<OrderPlacedResponse>> {
    if request.items.is_empty() {
        return Err(AppError::Validation(
            "Order must contain at least one item".to_owned(),
        ));
    }

    let customer_name = request.customer_name.trim().to_owned();
    if customer_name.is_empty() {
        return Err(AppError::Validation("Customer name is required".to_owned()));
    }

    let customer_email = request.customer_email.trim().to_owned();
    if !is_valid_email(&customer_email) {
        return Err(AppError::Validation(
            "A valid customer email is required".to_owned(),
        ));
    }

    let repository = OrderRepository::new(state.pool());

    // A retry with a known idempotency key replays the original order.
    if let Some(key) = request.idempotency_key.as_deref() {
        if let Some(existing) = repository.find_by_idempotency_key(key).await? {
            tracing::info!(order_id = %existing.id, "Replaying order for known idempotency key");
            return Ok(Json(OrderPlacedResponse {
                success: true,
                order_id: existing.id,
            }));
        }
    }

    let new_order = NewOrder {
        customer_name: customer_name.clone(),
        customer_email: customer_email.clone(),
        customer_phone: request.customer_phone,
        shipping_address: request.shipping_address,
        total_amount: request.total_amount,
        payment_method: request.payment_method,
        items: CartSnapshot::new(request.items),
        idempotency_key: request.idempotency_key,
    };

    let order_id = match repository.create(&new_order).await {
        Ok(id) => id,
        // Two submissions raced on the same key; the first write won.
        Err(err) if err.is_conflict() => {
            if let Some(key) = new_order.idempotency_key.as_deref() {
                if let Some(existing) = repository.find_by_idempotency_key(key).await? {
                    return Ok(Json(OrderPlacedResponse {
                        success: true,
                        order_id: existing.id,
                    }));
                }
            }
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    tracing::info!(order_id = %order_id, "Order placed");

    let mailer = Arc::clone(state.mailer());
    let content = email::order_confirmation(&customer_name, order_id, request.total_amount);
    tokio::spawn(async move {
        if let Err(err) = mailer.send(&customer_email, &content).await {
            tracing::warn!(order_id = %order_id, error = %err, "Failed to send order confirmation");
        }
    });

    Ok(Json(OrderPlacedResponse {
        success: true,
        order_id,
    }))
}

/// List all orders, newest first.
///
/// GET /api/orders
#[instrument(skip(state, _admin))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// Track an order.
///
/// GET /api/orders/:id
///
/// Returns the stored order plus the list of reached milestones, derived
/// from the current status alone.
#[instrument(skip(state))]
pub async fn track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrackingResponse>> {
    let Ok(id) = id.parse::<i64>() else {
        return Err(AppError::NotFound("Order not found"));
    };

    match OrderRepository::new(state.pool()).get(OrderId::new(id)).await? {
        Some(order) => {
            let milestones = order.status.milestones();
            Ok(Json(TrackingResponse { order, milestones }))
        }
        None => Err(AppError::NotFound("Order not found")),
    }
}

/// Overwrite the status of an order.
///
/// PUT /api/orders/:id/status
///
/// By default any of the five defined statuses may be written at any
/// time. With `STRICT_STATUS_TRANSITIONS` enabled, only single forward
/// steps and cancellation of a non-terminal order are accepted.
#[instrument(skip(state, admin, request))]
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> Result<Json<SuccessResponse>> {
    let Ok(id) = id.parse::<i64>() else {
        return Err(AppError::NotFound("Order not found"));
    };
    let id = OrderId::new(id);

    let repository = OrderRepository::new(state.pool());
    let Some(order) = repository.get(id).await? else {
        return Err(AppError::NotFound("Order not found"));
    };

    if state.config().strict_status_transitions && !order.status.can_become(request.status) {
        return Err(AppError::Validation(format!(
            "Illegal status transition from {} to {}",
            order.status, request.status
        )));
    }

    match repository.update_status(id, request.status).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => return Err(AppError::NotFound("Order not found")),
        Err(err) => return Err(err.into()),
    }
    tracing::info!(admin = %admin.sub, order_id = %id, status = %request.status, "Order status updated");

    Ok(Json(SuccessResponse::ok()))
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("priya@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.in"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("priya@"));
        assert!(!is_valid_email("priya@localhost"));
    }
}
