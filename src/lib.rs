// Allow our dollar.cents digit grouping convention (e.g., 50_00 = $50.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # outcry
//!
//! A deterministic single-class matching engine: limit, market, and stop
//! orders over a fixed set of instruments, with price-time priority and
//! structured event output.
//!
//! ## Features
//!
//! - **Order types**: Limit, Market, Stop (wrapping a limit or market child)
//! - **Price-time priority**: better price first, submission order breaks ties
//! - **All-or-cancel markets**: a market order fills completely or is
//!   cancelled as unfulfillable, never partially
//! - **Stop cascades**: triggered stops submit their children through a
//!   bounded work queue, so one trade can set off a chain of executions
//! - **Events, not text**: matching returns [`EngineEvent`]s; the
//!   [`notify`] module renders them as trader-facing lines
//! - **Fixed-point prices**: integer cents, no floating point
//!
//! ## Quick Start
//!
//! ```
//! use outcry::{Engine, EngineEvent, Order, Price, Side, Symbol};
//!
//! let mut engine = Engine::default();
//! engine.register("alice");
//! engine.register("bob");
//!
//! let tame = Symbol::new("TAME");
//!
//! // Alice offers 10 at $52.00; it rests on the book.
//! engine.submit(Order::limit("alice", Side::Sell, tame, 10, Price(52_00)));
//!
//! // Bob lifts the offer; both orders fill completely.
//! let events = engine.submit(Order::limit("bob", Side::Buy, tame, 10, Price(52_00)));
//! let fills = events
//!     .iter()
//!     .filter(|e| matches!(e, EngineEvent::Filled { .. }))
//!     .count();
//!
//! assert_eq!(fills, 2);
//! assert_eq!(engine.last_traded_price(tame), Some(Price(52_00)));
//! ```
//!
//! ## Price Representation
//!
//! Prices are stored as [`i64`] in cents:
//!
//! ```
//! use outcry::Price;
//!
//! let price = Price(50_50);  // $50.50
//! assert_eq!(format!("{}", price), "$50.50");
//! ```
//!
//! ## Stop Orders
//!
//! A stop order carries a child limit or market order and a trigger
//! price. It sits outside the book until the last-traded price crosses
//! the trigger, then the child is submitted like any other order:
//!
//! ```
//! use outcry::{Engine, Order, Price, Side, Symbol};
//!
//! let mut engine = Engine::default();
//! engine.register("alice");
//! engine.register("carol");
//! let tame = Symbol::new("TAME");
//!
//! // Liquidity for the stop's child to hit.
//! engine.submit(Order::limit("alice", Side::Buy, tame, 10, Price(44_00)));
//!
//! // Carol protects a long position: sell 5 at market if TAME trades
//! // at or below $45.00.
//! let child = Order::market("carol", Side::Sell, tame, 5);
//! engine.submit(Order::stop("carol", Side::Sell, tame, Price(45_00), child));
//!
//! // A trade at $44.00 fires the stop.
//! engine.submit(Order::limit("alice", Side::Sell, tame, 2, Price(44_00)));
//!
//! let carol = engine.account(&"carol".into()).unwrap();
//! assert_eq!(carol.position(tame), -5);
//! ```
//!
//! ## Notifications
//!
//! Events render to the exact lines traders see:
//!
//! ```
//! use outcry::{notify, Engine, Order, Price, Side, Symbol};
//!
//! let mut engine = Engine::default();
//! engine.register("alice");
//!
//! let order = Order::limit("alice", Side::Buy, Symbol::new("CRZY"), 10, Price(49_00));
//! let events = engine.submit(order);
//!
//! assert_eq!(
//!     notify::render(&events[0]),
//!     "Your limit order: `#1, BUY x10 CRZY @$49.00` is submitted."
//! );
//! ```

mod account;
mod book;
mod config;
mod engine;
mod error;
mod event;
pub mod notify;
mod order;
mod queue;
pub mod report;
mod side;
mod types;

// Re-export public API
pub use account::{Account, Accounts};
pub use book::InstrumentBook;
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{CancelReason, ValidationError};
pub use event::{EngineEvent, OrderSummary};
pub use order::{Order, OrderKind, OrderStatus};
pub use queue::OrderedQueue;
pub use side::Side;
pub use types::{AccountId, OrderId, Price, Quantity, Symbol, Timestamp};
