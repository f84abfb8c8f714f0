//! The order line-item snapshot.
//!
//! When a checkout is submitted the cart lines are copied into the order row
//! as denormalized data - product id, name, unit price, quantity - so that
//! later catalog edits or deletes can never alter a placed order. The copy is
//! stored inside a versioned envelope rather than as a loose blob, and reads
//! fail with a typed error instead of panicking on malformed rows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ProductId;

/// One denormalized line captured at checkout.
///
/// `price` is the resolved unit price (sale price when one applied). Fields
/// beyond the known four ride along in `extra` so the stored snapshot stays
/// equal to what the client submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    /// Build a bare line with no extra fields.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
            extra: Map::new(),
        }
    }
}

/// Versioned envelope an order's line items are stored in.
///
/// Rows written by earlier revisions hold a bare JSON array; those parse as
/// the first version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum CartSnapshot {
    V1 { items: Vec<LineItem> },
}

impl CartSnapshot {
    /// Wrap checkout lines in the current envelope version.
    #[must_use]
    pub const fn new(items: Vec<LineItem>) -> Self {
        Self::V1 { items }
    }

    /// The captured lines.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        match self {
            Self::V1 { items } => items,
        }
    }

    /// Consume the envelope, yielding the captured lines.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        match self {
            Self::V1 { items } => items,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Parse a stored snapshot column, accepting both the envelope and the
    /// legacy bare-array form.
    ///
    /// # Errors
    ///
    /// Returns the envelope parse error when the text matches neither form.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(raw).or_else(|err| {
            serde_json::from_str::<Vec<LineItem>>(raw)
                .map(|items| Self::V1 { items })
                .map_err(|_| err)
        })
    }

    /// Serialize the envelope for storage.
    ///
    /// # Errors
    ///
    /// Returns any underlying serialization error.
    pub fn to_stored_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
