//! Order representation and lifecycle.
//!
//! Orders are a tagged union: limit and market orders carry quantity and
//! fill accounting, stop orders wrap a fully-formed child order plus a
//! trigger price. Status is derived from the order's fields, never stored.

use crate::{AccountId, OrderId, Price, Quantity, Side, Symbol, Timestamp};
use std::fmt;

/// Status of an order in its lifecycle. Always derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    /// No identity yet; never seen by the engine.
    Unsubmitted,
    /// Accepted, no fills yet.
    New,
    /// Some quantity filled, remainder still live.
    PartiallyFilled,
    /// Fully executed (or, for stops, triggered).
    Filled,
    /// Cancelled; terminal, never resumes matching.
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order can still be filled or cancelled.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::PartiallyFilled)
    }

    /// Returns true if the order is terminal (no further state changes).
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// Variant-specific payload of an order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderKind {
    /// Rests at `price` until matched or cancelled.
    Limit {
        quantity: Quantity,
        filled: Quantity,
        price: Price,
    },
    /// Executes at whatever the book offers; never rests.
    Market { quantity: Quantity, filled: Quantity },
    /// Inert until the last-traded price crosses `trigger`, then submits
    /// the wrapped child order.
    Stop {
        trigger: Price,
        child: Box<Order>,
        executed: bool,
    },
}

/// An order in the matching engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    id: Option<OrderId>,
    timestamp: Timestamp,
    account: AccountId,
    side: Side,
    symbol: Symbol,
    cancelled: bool,
    kind: OrderKind,
}

impl Order {
    /// Create an unsubmitted limit order.
    pub fn limit(
        account: impl Into<AccountId>,
        side: Side,
        symbol: Symbol,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            id: None,
            timestamp: 0,
            account: account.into(),
            side,
            symbol,
            cancelled: false,
            kind: OrderKind::Limit {
                quantity,
                filled: 0,
                price,
            },
        }
    }

    /// Create an unsubmitted market order.
    pub fn market(
        account: impl Into<AccountId>,
        side: Side,
        symbol: Symbol,
        quantity: Quantity,
    ) -> Self {
        Self {
            id: None,
            timestamp: 0,
            account: account.into(),
            side,
            symbol,
            cancelled: false,
            kind: OrderKind::Market {
                quantity,
                filled: 0,
            },
        }
    }

    /// Create an unsubmitted stop order wrapping a child limit or market
    /// order. The child is submitted into the book when the trigger fires.
    pub fn stop(
        account: impl Into<AccountId>,
        side: Side,
        symbol: Symbol,
        trigger: Price,
        child: Order,
    ) -> Self {
        Self {
            id: None,
            timestamp: 0,
            account: account.into(),
            side,
            symbol,
            cancelled: false,
            kind: OrderKind::Stop {
                trigger,
                child: Box::new(child),
                executed: false,
            },
        }
    }

    // === Accessors ===

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn kind(&self) -> &OrderKind {
        &self.kind
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Requested quantity. Stops carry no quantity of their own and report 0.
    pub fn quantity(&self) -> Quantity {
        match self.kind {
            OrderKind::Limit { quantity, .. } | OrderKind::Market { quantity, .. } => quantity,
            OrderKind::Stop { .. } => 0,
        }
    }

    /// Filled quantity so far. Stops report 0.
    pub fn filled(&self) -> Quantity {
        match self.kind {
            OrderKind::Limit { filled, .. } | OrderKind::Market { filled, .. } => filled,
            OrderKind::Stop { .. } => 0,
        }
    }

    /// Quantity still available to fill.
    pub fn unfilled(&self) -> Quantity {
        self.quantity() - self.filled()
    }

    /// Limit price, for limit orders only.
    pub fn limit_price(&self) -> Option<Price> {
        match self.kind {
            OrderKind::Limit { price, .. } => Some(price),
            _ => None,
        }
    }

    /// Trigger price, for stop orders only.
    pub fn trigger_price(&self) -> Option<Price> {
        match self.kind {
            OrderKind::Stop { trigger, .. } => Some(trigger),
            _ => None,
        }
    }

    /// The wrapped child order, for stop orders only.
    pub fn child(&self) -> Option<&Order> {
        match &self.kind {
            OrderKind::Stop { child, .. } => Some(child),
            _ => None,
        }
    }

    /// Human-readable order type.
    pub fn type_label(&self) -> &'static str {
        match self.kind {
            OrderKind::Limit { .. } => "limit order",
            OrderKind::Market { .. } => "market order",
            OrderKind::Stop { .. } => "stop order",
        }
    }

    /// Command-style order code.
    pub fn code(&self) -> &'static str {
        match self.kind {
            OrderKind::Limit { .. } => "LIMIT",
            OrderKind::Market { .. } => "MARKET",
            OrderKind::Stop { .. } => "STOP",
        }
    }

    /// Derive the order's lifecycle status.
    pub fn status(&self) -> OrderStatus {
        if self.id.is_none() {
            return OrderStatus::Unsubmitted;
        }
        if self.cancelled {
            return OrderStatus::Cancelled;
        }
        match &self.kind {
            OrderKind::Stop { executed, .. } => {
                if *executed {
                    OrderStatus::Filled
                } else {
                    OrderStatus::New
                }
            }
            OrderKind::Limit {
                quantity, filled, ..
            }
            | OrderKind::Market { quantity, filled } => {
                if *filled == 0 {
                    OrderStatus::New
                } else if filled < quantity {
                    OrderStatus::PartiallyFilled
                } else {
                    OrderStatus::Filled
                }
            }
        }
    }

    /// Returns true if the order can still be filled or cancelled.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status().is_active()
    }

    // === Mutation (engine-driven) ===

    /// Assign identity and processing timestamp.
    ///
    /// # Panics
    ///
    /// Panics if the order already has an identity.
    pub(crate) fn assign(&mut self, id: OrderId, timestamp: Timestamp) {
        assert!(self.id.is_none(), "order {} already submitted", id);
        self.id = Some(id);
        self.timestamp = timestamp;
    }

    /// Increase the filled quantity.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` exceeds the unfilled remainder, or if the
    /// order is a stop (stops never fill directly).
    pub(crate) fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.unfilled(),
            "fill quantity {} exceeds unfilled {}",
            quantity,
            self.unfilled()
        );
        match &mut self.kind {
            OrderKind::Limit { filled, .. } | OrderKind::Market { filled, .. } => {
                *filled += quantity;
            }
            OrderKind::Stop { .. } => panic!("stop orders are triggered, not filled"),
        }
    }

    /// Set the sticky cancelled flag.
    pub(crate) fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Mark a stop order as executed (terminal).
    ///
    /// # Panics
    ///
    /// Panics on non-stop orders.
    pub(crate) fn mark_executed(&mut self) {
        match &mut self.kind {
            OrderKind::Stop { executed, .. } => *executed = true,
            _ => panic!("only stop orders execute"),
        }
    }

    /// Consume a stop order, yielding its child for submission.
    pub(crate) fn into_child(self) -> Option<Order> {
        match self.kind {
            OrderKind::Stop { child, .. } => Some(*child),
            _ => None,
        }
    }

    // === Text renderings (used by events and the display board) ===

    /// Full info string, e.g. `#3, BUY x10 TAME @$52.00`.
    pub fn describe(&self) -> String {
        let id = DisplayId(self.id);
        match &self.kind {
            OrderKind::Limit {
                quantity, price, ..
            } => format!(
                "{}, {} x{} {} @{}",
                id, self.side, quantity, self.symbol, price
            ),
            OrderKind::Market { quantity, .. } => {
                format!("{}, {} x{} {}", id, self.side, quantity, self.symbol)
            }
            OrderKind::Stop { trigger, child, .. } => format!(
                "{}, {} @{}, {}",
                id,
                self.symbol,
                trigger,
                child.stop_child_line()
            ),
        }
    }

    /// Board column line for a resting order, e.g. `#3, x7 @$52.00`.
    pub fn board_line(&self) -> String {
        match &self.kind {
            OrderKind::Limit { price, .. } => {
                format!("{}, x{} @{}", DisplayId(self.id), self.unfilled(), price)
            }
            OrderKind::Market { .. } => {
                format!("{}, x{}", DisplayId(self.id), self.unfilled())
            }
            OrderKind::Stop { trigger, .. } => {
                format!("{}, @{}", DisplayId(self.id), trigger)
            }
        }
    }

    /// Compact child rendering inside a stop's info string,
    /// e.g. `SELL MARKET x5` or `BUY LIMIT x10 @$52.00`.
    pub fn stop_child_line(&self) -> String {
        match &self.kind {
            OrderKind::Limit {
                quantity, price, ..
            } => format!("{} {} x{} @{}", self.side, self.code(), quantity, price),
            _ => format!("{} {} x{}", self.side, self.code(), self.quantity()),
        }
    }
}

/// `#n` for assigned ids, `#?` for unsubmitted orders.
struct DisplayId(Option<OrderId>);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "#?"),
        }
    }
}
