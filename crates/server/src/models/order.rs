//! Order model.

use chrono::NaiveDateTime;
use serde::Serialize;

use goatique_core::snapshot::{CartSnapshot, LineItem};
use goatique_core::{OrderId, OrderStatus};

/// A customer order.
///
/// `items` is the denormalized line item snapshot taken at checkout time.
/// It is parsed from the stored envelope by the repository and never
/// reflects later catalog edits.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_method: Option<String>,
    pub items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A validated order ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub total_amount: f64,
    pub payment_method: Option<String>,
    pub items: CartSnapshot,
    pub idempotency_key: Option<String>,
}
