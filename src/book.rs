//! Per-instrument book: bid/ask queues, last-traded price, pending stops.
//!
//! Both sides are [`OrderedQueue`]s of whole resting orders in price-time
//! priority. Stops live in two flat lists split by direction and are swept
//! when the last-traded price moves.

use crate::{Order, OrderedQueue, Price, Quantity, Side, Symbol};

/// Bid ordering: higher price first, earlier timestamp on ties.
fn bids_before(a: &Order, b: &Order) -> bool {
    let (pa, pb) = (resting_price(a), resting_price(b));
    if pa == pb {
        a.timestamp() < b.timestamp()
    } else {
        pa > pb
    }
}

/// Ask ordering: lower price first, earlier timestamp on ties.
fn asks_before(a: &Order, b: &Order) -> bool {
    let (pa, pb) = (resting_price(a), resting_price(b));
    if pa == pb {
        a.timestamp() < b.timestamp()
    } else {
        pa < pb
    }
}

/// Price of a resting order. Only limit orders rest.
fn resting_price(order: &Order) -> Price {
    order
        .limit_price()
        .expect("invariant: resting orders carry a limit price")
}

/// One instrument's book.
#[derive(Debug)]
pub struct InstrumentBook {
    symbol: Symbol,
    last_traded_price: Price,
    bids: OrderedQueue<Order>,
    asks: OrderedQueue<Order>,
    buy_stops: Vec<Order>,
    sell_stops: Vec<Order>,
}

impl InstrumentBook {
    pub fn new(symbol: Symbol, starting_price: Price) -> Self {
        Self {
            symbol,
            last_traded_price: starting_price,
            bids: OrderedQueue::new(bids_before),
            asks: OrderedQueue::new(asks_before),
            buy_stops: Vec::new(),
            sell_stops: Vec::new(),
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn last_traded_price(&self) -> Price {
        self.last_traded_price
    }

    /// The resting queue holding orders of the given side.
    pub fn queue(&self, side: Side) -> &OrderedQueue<Order> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(crate) fn queue_mut(&mut self, side: Side) -> &mut OrderedQueue<Order> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Drop cancelled/filled orders from the front of a queue so the next
    /// peek sees a live order. Queues are otherwise compacted lazily.
    pub(crate) fn skim_front(&mut self, side: Side) {
        let queue = self.queue_mut(side);
        while queue.peek().is_some_and(|o| !o.is_active()) {
            queue.pop();
        }
    }

    /// Best live bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.iter().find(|o| o.is_active()).map(resting_price)
    }

    /// Best live ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.iter().find(|o| o.is_active()).map(resting_price)
    }

    /// Total unfilled quantity resting on one side.
    pub fn depth(&self, side: Side) -> Quantity {
        self.queue(side)
            .iter()
            .filter(|o| o.is_active())
            .map(|o| o.unfilled())
            .sum()
    }

    /// Park a validated, identified stop order until its trigger fires.
    pub(crate) fn add_stop(&mut self, stop: Order) {
        match stop.side() {
            Side::Buy => self.buy_stops.push(stop),
            Side::Sell => self.sell_stops.push(stop),
        }
    }

    pub fn pending_stops(&self, side: Side) -> &[Order] {
        match side {
            Side::Buy => &self.buy_stops,
            Side::Sell => &self.sell_stops,
        }
    }

    /// Move the last-traded price, returning the stop orders whose
    /// triggers the move crossed.
    ///
    /// An upward tick selects BUY stops with `old < trigger <= new`; a
    /// downward tick selects SELL stops with `new <= trigger < old`
    /// (inclusive of the new price, exclusive of the old). Selected stops
    /// are removed from the pending list before any of them executes, so
    /// a cascade cannot re-trigger them; cancelled stops are dropped in
    /// the same sweep. Returns in pending-list (submission) order.
    pub(crate) fn set_last_traded_price(&mut self, new_price: Price) -> Vec<Order> {
        if new_price == self.last_traded_price {
            return Vec::new();
        }
        let old_price = std::mem::replace(&mut self.last_traded_price, new_price);

        let upward = old_price < new_price;
        let pending = if upward {
            std::mem::take(&mut self.buy_stops)
        } else {
            std::mem::take(&mut self.sell_stops)
        };

        let mut hit = Vec::new();
        let mut kept = Vec::new();
        for stop in pending {
            if stop.is_cancelled() {
                continue;
            }
            let trigger = stop
                .trigger_price()
                .expect("invariant: pending stop lists hold stop orders");
            let crossed = if upward {
                old_price < trigger && trigger <= new_price
            } else {
                new_price <= trigger && trigger < old_price
            };
            if crossed {
                hit.push(stop);
            } else {
                kept.push(stop);
            }
        }

        if upward {
            self.buy_stops = kept;
        } else {
            self.sell_stops = kept;
        }
        hit
    }

    /// Find any order (resting or pending stop) by id.
    pub(crate) fn find_mut(&mut self, id: crate::OrderId) -> Option<&mut Order> {
        self.bids
            .iter_mut()
            .chain(self.asks.iter_mut())
            .chain(self.buy_stops.iter_mut())
            .chain(self.sell_stops.iter_mut())
            .find(|o| o.id() == Some(id))
    }
}
