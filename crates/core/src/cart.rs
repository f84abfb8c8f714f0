//! The client-held shopping cart.
//!
//! [`Cart`] is an explicit state container: the embedding UI owns an instance
//! and injects it wherever it is needed - there is no global singleton. Every
//! mutation notifies subscribed listeners with the new line set so a view can
//! re-render, and the whole container serializes in both directions so a
//! session layer can persist it across reloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::snapshot::{CartSnapshot, LineItem};
use crate::types::{ProductId, money};

/// The product fields the cart needs when adding a line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRef {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
}

impl ProductRef {
    /// The price a customer actually pays: the sale price when one is set.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }
}

/// One product line held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn to_line_item(&self) -> LineItem {
        LineItem::new(
            self.product_id,
            self.name.clone(),
            money::to_f64(self.unit_price),
            self.quantity,
        )
    }
}

/// Handle returned by [`Cart::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[CartLine]) + Send>;

/// The cart state container.
#[derive(Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from previously serialized lines.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add one unit of a product: increments an existing line's quantity,
    /// otherwise inserts a new line with quantity 1 at the resolved unit
    /// price.
    pub fn add_item(&mut self, product: &ProductRef) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.unit_price(),
                quantity: 1,
            });
        }
        self.notify();
    }

    /// Delete the line for a product unconditionally.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            self.notify();
        }
    }

    /// Set a line's quantity. A quantity of zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
            self.notify();
        }
    }

    /// Empty the cart, as after a successful order placement.
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.notify();
        }
    }

    /// Sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Freeze the current lines for checkout submission.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.lines.iter().map(CartLine::to_line_item).collect())
    }

    /// Register a listener called with the line set after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[CartLine]) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(&self.lines);
        }
        // Listeners registered during notification are kept.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
