//! Read-only text reports over engine state.
//!
//! Three views: the per-account summary (positions plus pending orders),
//! the market summary table across all instruments, and the per-instrument
//! depth board. Column widths follow the fixed-width layout the front end
//! renders in a monospace block.

use crate::{AccountId, Engine, InstrumentBook, Order, Side};

/// Left-pad `value` to `width` with spaces; longer values pass through.
fn set_w(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

/// The market summary: one row per instrument with its last-traded price
/// and best bid/ask, `-` where a side is empty.
pub fn market_summary(engine: &Engine) -> String {
    let mut str = String::new();
    str.push_str(&set_w("Ticker", 10));
    str.push_str(&set_w("Price", 10));
    str.push_str(&set_w("Bid", 10));
    str.push_str(&set_w("Ask", 10));
    str.push('\n');

    for symbol in &engine.config().symbols {
        let book = engine
            .book(*symbol)
            .expect("invariant: one book per configured symbol");
        let bid = book
            .best_bid()
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        let ask = book
            .best_ask()
            .map_or_else(|| "-".to_string(), |p| p.to_string());

        str.push_str(&set_w(symbol.as_str(), 10));
        str.push_str(&set_w(&book.last_traded_price().to_string(), 10));
        str.push_str(&set_w(&bid, 10));
        str.push_str(&set_w(&ask, 10));
        str.push('\n');
    }
    str
}

/// One instrument's depth board: active bids and asks side by side, best
/// first, each row `#id, x<unfilled> @price`.
pub fn depth_board(book: &InstrumentBook) -> String {
    let bids: Vec<String> = book
        .queue(Side::Buy)
        .iter()
        .filter(|o| o.is_active())
        .map(Order::board_line)
        .collect();
    let asks: Vec<String> = book
        .queue(Side::Sell)
        .iter()
        .filter(|o| o.is_active())
        .map(Order::board_line)
        .collect();

    let mut str = format!("Ticker: {}\n", book.symbol());
    str.push_str(&set_w("Bids", 25));
    str.push_str("Asks\n");
    for i in 0..bids.len().max(asks.len()) {
        str.push_str(&set_w(bids.get(i).map_or("", String::as_str), 25));
        if let Some(ask) = asks.get(i) {
            str.push_str(ask);
        }
        str.push('\n');
    }
    str
}

/// The full display-board payload a front end publishes periodically:
/// the market summary followed by each instrument's depth board. The
/// engine knows nothing about where (or how often) this is posted.
pub fn render_board(engine: &Engine) -> String {
    let mut str = market_summary(engine);
    for symbol in &engine.config().symbols {
        if let Some(book) = engine.book(*symbol) {
            str.push('\n');
            str.push_str(&depth_board(book));
        }
    }
    str
}

/// A trader's view of their own state: non-zero positions and every order
/// of theirs still resting in a bid/ask queue, in submission order.
/// Pending stops are not listed; they are not resting orders.
/// `None` if the trader is not registered.
pub fn account_summary(engine: &Engine, key: &AccountId) -> Option<String> {
    let account = engine.account(key)?;

    let mut str = String::from("Position:\n");
    for (symbol, position) in account.open_positions() {
        str.push_str(&set_w(symbol.as_str(), 8));
        str.push_str(&position.to_string());
        str.push('\n');
    }

    str.push_str("Pending Orders:\n");
    let mut pending: Vec<&Order> = Vec::new();
    for symbol in &engine.config().symbols {
        let book = engine
            .book(*symbol)
            .expect("invariant: one book per configured symbol");
        for side in [Side::Buy, Side::Sell] {
            pending.extend(
                book.queue(side)
                    .iter()
                    .filter(|o| o.account() == key && o.is_active()),
            );
        }
    }
    pending.sort_by_key(|o| o.id());
    for order in pending {
        str.push_str(&order.describe());
        str.push('\n');
    }
    Some(str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Order, Price, Symbol};

    fn tame() -> Symbol {
        Symbol::new("TAME")
    }

    fn engine() -> Engine {
        let mut engine = Engine::default();
        engine.register("alice");
        engine.register("bob");
        engine
    }

    #[test]
    fn market_summary_empty_book() {
        let engine = engine();
        let expected = "\
Ticker    Price     Bid       Ask       \n\
CRZY      $50.00    -         -         \n\
TAME      $50.00    -         -         \n";
        assert_eq!(market_summary(&engine), expected);
    }

    #[test]
    fn market_summary_shows_best_quotes() {
        let mut engine = engine();
        engine.submit(Order::limit("alice", Side::Buy, tame(), 5, Price(49_00)));
        engine.submit(Order::limit("bob", Side::Sell, tame(), 5, Price(52_00)));

        let summary = market_summary(&engine);
        assert!(summary.contains("TAME      $50.00    $49.00    $52.00    "));
        assert!(summary.contains("CRZY      $50.00    -         -         "));
    }

    #[test]
    fn depth_board_lists_unfilled_quantities() {
        let mut engine = engine();
        engine.submit(Order::limit("alice", Side::Buy, tame(), 10, Price(49_00))); // id 1
        engine.submit(Order::limit("bob", Side::Sell, tame(), 5, Price(52_00))); // id 2
        engine.submit(Order::limit("bob", Side::Sell, tame(), 3, Price(49_00))); // id 3, partial fill vs id 1

        let board = depth_board(engine.book(tame()).unwrap());
        let expected = "\
Ticker: TAME\n\
Bids                     Asks\n\
#1, x7 @$49.00           #2, x5 @$52.00\n";
        assert_eq!(board, expected);
    }

    #[test]
    fn depth_board_skips_cancelled_orders() {
        let mut engine = engine();
        engine.submit(Order::limit("alice", Side::Buy, tame(), 10, Price(49_00))); // id 1
        engine.submit(Order::limit("alice", Side::Buy, tame(), 4, Price(48_00))); // id 2
        engine.cancel(crate::OrderId(1), crate::CancelReason::Other);

        let board = depth_board(engine.book(tame()).unwrap());
        assert!(!board.contains("#1"));
        assert!(board.contains("#2, x4 @$48.00"));
    }

    #[test]
    fn account_summary_positions_and_pending() {
        let mut engine = engine();
        engine.submit(Order::limit("alice", Side::Sell, tame(), 10, Price(52_00))); // id 1
        engine.submit(Order::limit("bob", Side::Buy, tame(), 4, Price(52_00))); // id 2, fills 4
        let child = Order::market("alice", Side::Sell, tame(), 2);
        engine.submit(Order::stop("alice", Side::Sell, tame(), Price(45_00), child)); // id 3

        let summary = account_summary(&engine, &AccountId::from("alice")).unwrap();
        // The pending stop (#3) is not a resting order and is not listed.
        let expected = "\
Position:\n\
TAME    -4\n\
Pending Orders:\n\
#1, SELL x10 TAME @$52.00\n";
        assert_eq!(summary, expected);
    }

    #[test]
    fn render_board_covers_every_instrument() {
        let mut engine = engine();
        engine.submit(Order::limit("alice", Side::Buy, tame(), 5, Price(49_00)));

        let board = render_board(&engine);
        assert!(board.starts_with("Ticker    Price     Bid       Ask       \n"));
        assert!(board.contains("Ticker: CRZY\n"));
        assert!(board.contains("Ticker: TAME\n"));
        assert!(board.contains("#1, x5 @$49.00"));
    }

    #[test]
    fn account_summary_unknown_trader() {
        let engine = engine();
        assert!(account_summary(&engine, &AccountId::from("ghost")).is_none());
    }
}
