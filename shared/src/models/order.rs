//! Order Model
//!
//! A persisted order plus its line items, and the fulfillment status
//! machine staff drive it through. Line-item prices are captured at order
//! time and never track later menu edits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Status Machines
// =============================================================================

/// Fulfillment status of a persisted order
///
/// `DELIVERED` and `CANCELLED` are terminal. Every change is
/// operator-initiated; there are no timed transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// True when no further transition is permitted
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The full transition table. Anything not listed here is illegal.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        matches!(
            (self, target),
            (OrderStatus::Pending, OrderStatus::Preparing)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Preparing, OrderStatus::Ready)
                | (OrderStatus::Preparing, OrderStatus::Cancelled)
                | (OrderStatus::Ready, OrderStatus::Delivered)
        )
    }

    /// Legal targets from this status, in fulfillment order
    pub fn allowed_targets(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }
}

/// Payment settlement state
///
/// Initialized to `PENDING` at order creation; settlement transitions
/// belong to the payment gateway and are not modeled here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

// =============================================================================
// Order
// =============================================================================

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Record id, assigned by the store on insert
    pub id: Option<String>,
    /// Owning identity
    pub user_id: String,
    /// Grand total (subtotal + tax + delivery fee) in currency units
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// UTC milliseconds
    pub created_at: i64,
    /// UTC milliseconds, bumped on every status change
    pub updated_at: i64,
}

/// Order line item
///
/// `price` is the unit price at order time. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Option<String>,
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: u32,
    /// Unit price captured from the cart snapshot, not a menu lookup
    pub price: Decimal,
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: String,
    pub total_amount: Decimal,
}

/// Create order item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: u32,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn test_transition_table_is_exact() {
        let legal = [
            (OrderStatus::Pending, OrderStatus::Preparing),
            (OrderStatus::Pending, OrderStatus::Cancelled),
            (OrderStatus::Preparing, OrderStatus::Ready),
            (OrderStatus::Preparing, OrderStatus::Cancelled),
            (OrderStatus::Ready, OrderStatus::Delivered),
        ];

        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_terminal_statuses_allow_nothing() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            assert!(terminal.allowed_targets().is_empty());
            for to in ALL {
                assert!(!terminal.can_transition_to(to));
            }
        }
    }

    #[test]
    fn test_allowed_targets_agree_with_table() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.allowed_targets().contains(&to),
                    from.can_transition_to(to)
                );
            }
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"PREPARING\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"PAID\""
        );

        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_default_statuses() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }
}
