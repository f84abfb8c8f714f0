//! Order lifecycle status, tracking milestones, and message kinds.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a placed order.
///
/// The forward path is `pending → processing → shipped → delivered`;
/// `cancelled` is reachable from any non-terminal state. Whether transitions
/// are actually enforced is a server configuration concern - by default any
/// status overwrite is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All defined statuses, in forward order with `cancelled` last.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Whether no further transitions leave this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether the strict status guard permits moving from `self` to `next`.
    ///
    /// Forward steps advance one stage at a time; cancellation is allowed
    /// from any non-terminal state. Re-asserting the current status is
    /// always permitted.
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        if self as u8 == next as u8 {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Shipped)
                | (Self::Shipped, Self::Delivered)
                | (Self::Pending | Self::Processing | Self::Shipped, Self::Cancelled)
        )
    }

    /// The set of forward milestones a tracking view shows as reached,
    /// derived by set-membership against the current status, not history.
    ///
    /// A cancelled order reports only [`Milestone::Placed`].
    #[must_use]
    pub fn milestones(self) -> Vec<Milestone> {
        Milestone::ALL
            .into_iter()
            .filter(|m| m.reached(self))
            .collect()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// One of the four forward-progress labels a customer sees when tracking
/// an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Placed,
    Processing,
    Shipped,
    Delivered,
}

impl Milestone {
    /// All milestones in forward order.
    pub const ALL: [Self; 4] = [
        Self::Placed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
    ];

    /// Whether this milestone counts as reached for the given status.
    #[must_use]
    pub const fn reached(self, status: OrderStatus) -> bool {
        match self {
            Self::Placed => true,
            Self::Processing => matches!(
                status,
                OrderStatus::Processing | OrderStatus::Shipped | OrderStatus::Delivered
            ),
            Self::Shipped => matches!(status, OrderStatus::Shipped | OrderStatus::Delivered),
            Self::Delivered => matches!(status, OrderStatus::Delivered),
        }
    }
}

/// Kind tag of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Contact,
    Bulk,
    Newsletter,
}

impl MessageKind {
    /// Whether this kind triggers an acknowledgment email to the sender.
    ///
    /// Newsletter signups are stored silently.
    #[must_use]
    pub const fn sends_acknowledgment(self) -> bool {
        matches!(self, Self::Contact | Self::Bulk)
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contact => write!(f, "contact"),
            Self::Bulk => write!(f, "bulk"),
            Self::Newsletter => write!(f, "newsletter"),
        }
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(Self::Contact),
            "bulk" => Ok(Self::Bulk),
            "newsletter" => Ok(Self::Newsletter),
            _ => Err(format!("invalid message kind: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!("refunded".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
        assert!("Pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn strict_guard_allows_forward_steps() {
        assert!(OrderStatus::Pending.can_become(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_become(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_become(OrderStatus::Delivered));
    }

    #[test]
    fn strict_guard_allows_cancellation_from_non_terminal() {
        assert!(OrderStatus::Pending.can_become(OrderStatus::Cancelled));
        assert!(OrderStatus::Processing.can_become(OrderStatus::Cancelled));
        assert!(OrderStatus::Shipped.can_become(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_become(OrderStatus::Cancelled));
    }

    #[test]
    fn strict_guard_rejects_backward_and_skipping_moves() {
        assert!(!OrderStatus::Delivered.can_become(OrderStatus::Pending));
        assert!(!OrderStatus::Pending.can_become(OrderStatus::Delivered));
        assert!(!OrderStatus::Shipped.can_become(OrderStatus::Processing));
        assert!(!OrderStatus::Cancelled.can_become(OrderStatus::Pending));
    }

    #[test]
    fn strict_guard_accepts_reasserting_current_status() {
        for status in OrderStatus::ALL {
            assert!(status.can_become(status));
        }
    }

    #[test]
    fn shipped_reaches_exactly_placed_processing_shipped() {
        let reached = OrderStatus::Shipped.milestones();
        assert_eq!(
            reached,
            vec![Milestone::Placed, Milestone::Processing, Milestone::Shipped]
        );
    }

    #[test]
    fn cancelled_reaches_only_placed() {
        assert_eq!(OrderStatus::Cancelled.milestones(), vec![Milestone::Placed]);
    }

    #[test]
    fn delivered_reaches_every_milestone() {
        assert_eq!(
            OrderStatus::Delivered.milestones(),
            Milestone::ALL.to_vec()
        );
    }

    #[test]
    fn pending_reaches_only_placed() {
        assert_eq!(OrderStatus::Pending.milestones(), vec![Milestone::Placed]);
    }

    #[test]
    fn newsletter_is_silent() {
        assert!(MessageKind::Contact.sends_acknowledgment());
        assert!(MessageKind::Bulk.sends_acknowledgment());
        assert!(!MessageKind::Newsletter.sends_acknowledgment());
    }

    #[test]
    fn message_kind_parses_wire_tags() {
        assert_eq!("contact".parse::<MessageKind>().unwrap(), MessageKind::Contact);
        assert_eq!("bulk".parse::<MessageKind>().unwrap(), MessageKind::Bulk);
        assert_eq!(
            "newsletter".parse::<MessageKind>().unwrap(),
            MessageKind::Newsletter
        );
        assert!("spam".parse::<MessageKind>().is_err());
    }
}
