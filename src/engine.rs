//! The engine: order validation, identity assignment, matching, and
//! stop-trigger propagation.
//!
//! This is the single entry point for submitting and cancelling orders.
//! Submission is synchronous: one order is fully validated, matched, and
//! its cascading stop triggers resolved before `submit` returns. Stop
//! cascades are driven by an explicit work queue rather than call-stack
//! recursion, so the whole cascade runs inside one exclusive section.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::{
    Account, AccountId, Accounts, CancelReason, EngineConfig, EngineEvent, InstrumentBook, Order,
    OrderId, OrderKind, OrderSummary, Price, Quantity, Side, Symbol, Timestamp, ValidationError,
};

/// The matching engine: one [`InstrumentBook`] per valid symbol, the
/// account registry, and the monotonic id/timestamp counters.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    accounts: Accounts,
    books: FxHashMap<Symbol, InstrumentBook>,
    next_order_id: u64,
    clock: Timestamp,
}

impl Engine {
    /// Upper bound on orders processed per submission, guarding against a
    /// pathological stop cascade.
    const MAX_CASCADE_DEPTH: usize = 100;

    /// Build an engine with one empty book per configured symbol.
    pub fn new(config: EngineConfig) -> Self {
        let books = config
            .symbols
            .iter()
            .map(|sym| (*sym, InstrumentBook::new(*sym, config.starting_price)))
            .collect();
        Self {
            config,
            accounts: Accounts::new(),
            books,
            next_order_id: 1,
            clock: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Registration ===

    /// Register a trader. Idempotent: an existing account is returned
    /// untouched, positions intact.
    pub fn register(&mut self, key: impl Into<AccountId>) -> &Account {
        let key = key.into();
        if !self.accounts.contains(&key) {
            debug!(trader = %key, "registering trader");
        }
        self.accounts
            .register(key, self.config.default_position_limit, &self.config.symbols)
    }

    pub fn account(&self, key: &AccountId) -> Option<&Account> {
        self.accounts.get(key)
    }

    // === Submission ===

    /// Submit an order.
    ///
    /// Validates, assigns identity and timestamp, matches against the
    /// resting book, and drains any stop-trigger cascade the resulting
    /// price move starts. Returns the structured events in the order they
    /// occurred; render them with [`crate::notify::render`] for the
    /// human-readable phrasing.
    pub fn submit(&mut self, order: Order) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let mut follow_ups = VecDeque::new();
        follow_ups.push_back(order);

        let mut processed = 0;
        while let Some(next) = follow_ups.pop_front() {
            processed += 1;
            if processed > Self::MAX_CASCADE_DEPTH {
                warn!("stop cascade exceeded depth bound; dropping remainder");
                break;
            }
            self.process(next, &mut events, &mut follow_ups);
        }
        events
    }

    /// Validate, identify, and dispatch one order. Triggered stop children
    /// are enqueued on `follow_ups`, never submitted recursively.
    fn process(
        &mut self,
        mut order: Order,
        events: &mut Vec<EngineEvent>,
        follow_ups: &mut VecDeque<Order>,
    ) {
        if let Err(error) = self.validate(&order) {
            debug!(%error, trader = %order.account(), "order rejected");
            events.push(EngineEvent::Rejected {
                account: order.account().clone(),
                error,
            });
            return;
        }

        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        self.clock += 1;
        order.assign(id, self.clock);
        debug!(order = %order.describe(), "order submitted");
        events.push(EngineEvent::Submitted {
            order: OrderSummary::of(&order),
        });

        if matches!(order.kind(), OrderKind::Stop { .. }) {
            let book = self
                .books
                .get_mut(&order.symbol())
                .expect("invariant: symbol validated");
            book.add_stop(order);
        } else if matches!(order.kind(), OrderKind::Market { .. }) {
            self.process_market(order, events, follow_ups);
        } else {
            self.process_limit(order, events, follow_ups);
        }
    }

    /// Run the full validation chain, first failure wins. No state is
    /// mutated and no identity is consumed on failure.
    fn validate(&self, order: &Order) -> Result<(), ValidationError> {
        if !self.accounts.contains(order.account()) {
            return Err(ValidationError::UnknownTrader(order.account().clone()));
        }
        let book = self
            .books
            .get(&order.symbol())
            .ok_or(ValidationError::UnknownSymbol(order.symbol()))?;

        match order.kind() {
            OrderKind::Limit {
                quantity, price, ..
            } => {
                if *quantity == 0 {
                    return Err(ValidationError::ZeroQuantity);
                }
                if price.0 <= 0 {
                    return Err(ValidationError::InvalidLimitPrice);
                }
            }
            OrderKind::Market { quantity, .. } => {
                if *quantity == 0 {
                    return Err(ValidationError::ZeroQuantity);
                }
            }
            OrderKind::Stop { trigger, child, .. } => {
                if trigger.0 <= 0 {
                    return Err(ValidationError::InvalidTriggerPrice);
                }
                self.validate(child)?;
                let last = book.last_traded_price();
                match order.side() {
                    Side::Buy if !(last < *trigger) => {
                        return Err(ValidationError::TriggerNotAboveMarket);
                    }
                    Side::Sell if !(*trigger < last) => {
                        return Err(ValidationError::TriggerNotBelowMarket);
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Match a limit order against the opposing queue while prices cross,
    /// then rest any remainder on its own side.
    fn process_limit(
        &mut self,
        mut order: Order,
        events: &mut Vec<EngineEvent>,
        follow_ups: &mut VecDeque<Order>,
    ) {
        let symbol = order.symbol();
        let limit_price = order
            .limit_price()
            .expect("invariant: limit order carries a price");
        let opposing = order.side().opposite();

        let book = self
            .books
            .get_mut(&symbol)
            .expect("invariant: symbol validated");
        let mut last_price = book.last_traded_price();

        while order.is_active() {
            book.skim_front(opposing);
            let Some(best_price) = book
                .queue(opposing)
                .peek()
                .and_then(|best| best.limit_price())
            else {
                break; // no liquidity
            };

            let crosses = match order.side() {
                Side::Buy => limit_price >= best_price,
                Side::Sell => best_price >= limit_price,
            };
            if !crosses {
                break;
            }

            let best = book
                .queue_mut(opposing)
                .peek_mut()
                .expect("invariant: peeked above");
            let traded = match_orders(&mut order, best, &mut self.accounts);
            trace!(quantity = traded, price = %best_price, "matched");

            // Trades execute at the resting order's price.
            last_price = best_price;

            let resting_done = !best.is_active();
            let resting_summary = resting_done.then(|| OrderSummary::of(best));
            if let Some(summary) = resting_summary {
                events.push(EngineEvent::Filled { order: summary });
                book.queue_mut(opposing).pop();
            }
        }

        if order.is_active() {
            book.queue_mut(order.side()).insert(order);
        } else {
            events.push(EngineEvent::Filled {
                order: OrderSummary::of(&order),
            });
        }

        // Applied once, after the loop. This is what can cascade.
        self.apply_last_price(symbol, last_price, events, follow_ups);
    }

    /// Execute a market order: all-or-cancel against opposing depth, no
    /// price check, never rests.
    fn process_market(
        &mut self,
        mut order: Order,
        events: &mut Vec<EngineEvent>,
        follow_ups: &mut VecDeque<Order>,
    ) {
        let symbol = order.symbol();
        let opposing = order.side().opposite();

        let available = self
            .books
            .get(&symbol)
            .expect("invariant: symbol validated")
            .depth(opposing);
        if order.quantity() > available {
            debug!(
                order = %order.describe(),
                available,
                "market order unfulfillable"
            );
            order.cancel();
            events.push(EngineEvent::Cancelled {
                order: OrderSummary::of(&order),
                reason: CancelReason::Unfulfillable,
            });
            return;
        }

        let book = self
            .books
            .get_mut(&symbol)
            .expect("invariant: symbol validated");
        let mut last_price = book.last_traded_price();

        while order.is_active() {
            book.skim_front(opposing);
            let best_price = book
                .queue(opposing)
                .peek()
                .and_then(|best| best.limit_price())
                .expect("invariant: depth check guarantees opposing liquidity");

            let best = book
                .queue_mut(opposing)
                .peek_mut()
                .expect("invariant: peeked above");
            let traded = match_orders(&mut order, best, &mut self.accounts);
            trace!(quantity = traded, price = %best_price, "matched");
            last_price = best_price;

            let resting_done = !best.is_active();
            let resting_summary = resting_done.then(|| OrderSummary::of(best));
            if let Some(summary) = resting_summary {
                events.push(EngineEvent::Filled { order: summary });
                book.queue_mut(opposing).pop();
            }
        }

        events.push(EngineEvent::Filled {
            order: OrderSummary::of(&order),
        });
        self.apply_last_price(symbol, last_price, events, follow_ups);
    }

    /// Move the instrument's last-traded price and enqueue the children of
    /// any stops the move triggered.
    fn apply_last_price(
        &mut self,
        symbol: Symbol,
        new_price: Price,
        events: &mut Vec<EngineEvent>,
        follow_ups: &mut VecDeque<Order>,
    ) {
        let book = self
            .books
            .get_mut(&symbol)
            .expect("invariant: symbol validated");
        for mut stop in book.set_last_traded_price(new_price) {
            stop.mark_executed();
            debug!(order = %stop.describe(), "stop triggered");
            events.push(EngineEvent::Triggered {
                order: OrderSummary::of(&stop),
            });
            let child = stop
                .into_child()
                .expect("invariant: triggered orders are stops");
            follow_ups.push_back(child);
        }
    }

    // === Cancellation (internal primitive) ===

    /// Cancel a live order wherever it rests: bid/ask queue or pending
    /// stop list. The flag is sticky; queues drop the entry lazily.
    pub fn cancel(&mut self, id: OrderId, reason: CancelReason) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        for book in self.books.values_mut() {
            if let Some(order) = book.find_mut(id) {
                if !order.is_active() {
                    return events;
                }
                order.cancel();
                debug!(order = %order.describe(), ?reason, "order cancelled");
                events.push(EngineEvent::Cancelled {
                    order: OrderSummary::of(order),
                    reason,
                });
                return events;
            }
        }
        events
    }

    // === Queries ===

    /// The instrument book for a symbol, if valid.
    pub fn book(&self, symbol: Symbol) -> Option<&InstrumentBook> {
        self.books.get(&symbol)
    }

    /// Last-traded price for a symbol.
    pub fn last_traded_price(&self, symbol: Symbol) -> Option<Price> {
        self.books.get(&symbol).map(|b| b.last_traded_price())
    }

    pub fn best_bid(&self, symbol: Symbol) -> Option<Price> {
        self.books.get(&symbol).and_then(|b| b.best_bid())
    }

    pub fn best_ask(&self, symbol: Symbol) -> Option<Price> {
        self.books.get(&symbol).and_then(|b| b.best_ask())
    }

    /// Total unfilled bid quantity; 0 for unknown symbols.
    pub fn bids_depth(&self, symbol: Symbol) -> Quantity {
        self.books
            .get(&symbol)
            .map_or(0, |b| b.depth(Side::Buy))
    }

    /// Total unfilled ask quantity; 0 for unknown symbols.
    pub fn asks_depth(&self, symbol: Symbol) -> Quantity {
        self.books
            .get(&symbol)
            .map_or(0, |b| b.depth(Side::Sell))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// The matching primitive: trade `min(unfilled, unfilled)` between two
/// orders and adjust both owners' positions. This is the only path by
/// which positions change.
fn match_orders(incoming: &mut Order, resting: &mut Order, accounts: &mut Accounts) -> Quantity {
    let tradable = incoming.unfilled().min(resting.unfilled());
    incoming.fill(tradable);
    resting.fill(tradable);
    accounts.apply_fill(
        incoming.account(),
        incoming.symbol(),
        tradable as i64 * incoming.side().position_sign(),
    );
    accounts.apply_fill(
        resting.account(),
        resting.symbol(),
        tradable as i64 * resting.side().position_sign(),
    );
    tradable
}
