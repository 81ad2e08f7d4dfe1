//! Structured events emitted by the engine.
//!
//! Matching is a pure state transition that returns a sequence of these
//! events; rendering them as chat notifications is a separate projection
//! (see [`crate::notify`]). This keeps the core testable without any
//! transport.

use crate::{AccountId, CancelReason, Order, OrderId, Side, Symbol, ValidationError};

/// A point-in-time snapshot of an order, captured when an event is
/// emitted. Carries enough to render a notification and to assert on in
/// tests without holding a reference into the book.
// Serialize only: the static type label has no owned deserialized form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderSummary {
    pub id: OrderId,
    pub account: AccountId,
    pub side: Side,
    pub symbol: Symbol,
    /// Human-readable order type ("limit order", "market order", "stop order").
    pub type_label: &'static str,
    /// Full info string, e.g. `#3, BUY x10 TAME @$52.00`.
    pub info: String,
}

impl OrderSummary {
    /// Snapshot a submitted order.
    ///
    /// # Panics
    ///
    /// Panics if the order has no identity yet. Events are only emitted
    /// for orders the engine has accepted.
    pub fn of(order: &Order) -> Self {
        Self {
            id: order
                .id()
                .expect("invariant: events describe submitted orders"),
            account: order.account().clone(),
            side: order.side(),
            symbol: order.symbol(),
            type_label: order.type_label(),
            info: order.describe(),
        }
    }
}

/// Everything the engine reports back about a submission or cancellation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EngineEvent {
    /// Validation failed; no state was mutated and no identity consumed.
    Rejected {
        account: AccountId,
        error: ValidationError,
    },
    /// Order passed validation and received an identity.
    Submitted { order: OrderSummary },
    /// A quantity-bearing order became completely filled.
    Filled { order: OrderSummary },
    /// A stop order's trigger fired; its child order was submitted.
    Triggered { order: OrderSummary },
    /// An accepted order was cancelled.
    Cancelled {
        order: OrderSummary,
        reason: CancelReason,
    },
}

impl EngineEvent {
    /// The account this event concerns.
    pub fn account(&self) -> &AccountId {
        match self {
            EngineEvent::Rejected { account, .. } => account,
            EngineEvent::Submitted { order }
            | EngineEvent::Filled { order }
            | EngineEvent::Triggered { order }
            | EngineEvent::Cancelled { order, .. } => &order.account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Price, Side};

    #[test]
    fn summary_of_submitted_order() {
        let mut order = Order::limit("alice", Side::Buy, Symbol::new("TAME"), 10, Price(52_00));
        order.assign(OrderId(3), 1);

        let summary = OrderSummary::of(&order);
        assert_eq!(summary.id, OrderId(3));
        assert_eq!(summary.account, AccountId::from("alice"));
        assert_eq!(summary.side, Side::Buy);
        assert_eq!(summary.type_label, "limit order");
        assert_eq!(summary.info, "#3, BUY x10 TAME @$52.00");
    }

    #[test]
    #[should_panic(expected = "submitted orders")]
    fn summary_of_unsubmitted_order_panics() {
        let order = Order::limit("alice", Side::Buy, Symbol::new("TAME"), 10, Price(52_00));
        OrderSummary::of(&order);
    }

    #[test]
    fn event_account() {
        let rejected = EngineEvent::Rejected {
            account: AccountId::from("mallory"),
            error: ValidationError::ZeroQuantity,
        };
        assert_eq!(rejected.account(), &AccountId::from("mallory"));

        let mut order = Order::market("bob", Side::Sell, Symbol::new("CRZY"), 5);
        order.assign(OrderId(4), 2);
        let filled = EngineEvent::Filled {
            order: OrderSummary::of(&order),
        };
        assert_eq!(filled.account(), &AccountId::from("bob"));
    }
}
