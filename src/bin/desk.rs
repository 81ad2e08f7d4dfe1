//! Interactive trading desk CLI.
//!
//! A REPL for experimenting with the matching engine. You act as one
//! trader at a time; `join` registers a trader and switches to them.
//!
//! Usage:
//!   cargo run --bin desk
//!   desk  (if installed via cargo install)

use outcry::{
    notify, report, AccountId, CancelReason, Engine, Order, OrderId, Price, Side, Symbol,
};
use std::io::{self, BufRead, Write};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut engine = Engine::default();
    let mut current: Option<AccountId> = None;

    println!("Trading Desk CLI v0.3.0");
    println!("Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("desk> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break; // EOF
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts.first().map(|s| s.to_lowercase());

        match cmd.as_deref() {
            Some("help" | "h" | "?") => print_help(),
            Some("quit" | "exit" | "q") => break,
            Some("join" | "j") => handle_join(&mut engine, &mut current, &parts[1..]),
            Some("position" | "p") => handle_position(&engine, &current),
            Some("buy") => handle_order(&mut engine, &current, Side::Buy, &parts[1..]),
            Some("sell") => handle_order(&mut engine, &current, Side::Sell, &parts[1..]),
            Some("cancel" | "c") => handle_cancel(&mut engine, &parts[1..]),
            Some("board" | "b") => handle_board(&engine, &parts[1..]),
            Some("market" | "m") => print!("{}", report::market_summary(&engine)),
            Some(cmd) => println!("Unknown command: '{}'. Type 'help' for commands.", cmd),
            None => {}
        }
    }

    println!("Goodbye!");
}

fn print_help() {
    println!(
        r#"
Commands:
  join <name>                                 Register a trader and act as them
  position                                    Show your positions and pending orders
  buy  LIMIT <ticker> <qty> <price>           Submit a buy limit order
  sell LIMIT <ticker> <qty> <price>           Submit a sell limit order
  buy  MARKET <ticker> <qty>                  Submit a buy market order
  sell MARKET <ticker> <qty>                  Submit a sell market order
  buy  STOP <ticker> <trigger> LIMIT <qty> <price>
  buy  STOP <ticker> <trigger> MARKET <qty>   Stops wrap a child order
  sell STOP ...                               Same forms as buy STOP
  cancel <order_id>                           Cancel an order
  board [ticker]                              Show depth for one ticker, or the full board
  market                                      Show the market summary table
  help                                        Show this help
  quit                                        Exit

Examples:
  join alice                  Trade as alice
  buy LIMIT TAME 10 52        Buy 10 TAME at $52.00
  sell MARKET CRZY 5          Sell 5 CRZY at market
  sell STOP TAME 45 MARKET 5  If TAME trades at/below $45, sell 5 at market

Prices are in dollars (e.g., 52.50 = $52.50)
"#
    );
}

fn handle_join(engine: &mut Engine, current: &mut Option<AccountId>, args: &[&str]) {
    let Some(name) = args.first() else {
        println!("Usage: join <name>");
        return;
    };
    let key = AccountId::from(*name);
    engine.register(key.clone());
    println!("You've been added to the trader list.");
    *current = Some(key);
}

fn handle_position(engine: &Engine, current: &Option<AccountId>) {
    let Some(key) = current else {
        println!("Not acting as anyone. Use: join <name>");
        return;
    };
    match report::account_summary(engine, key) {
        Some(summary) => print!("{}", summary),
        None => println!("{} is not a registered trader.", key),
    }
}

fn handle_order(engine: &mut Engine, current: &Option<AccountId>, side: Side, args: &[&str]) {
    let Some(key) = current else {
        println!("Not acting as anyone. Use: join <name>");
        return;
    };

    let Some(order) = parse_order(key.clone(), side, args) else {
        println!(
            "Usage: {} LIMIT <ticker> <qty> <price>",
            side.to_string().to_lowercase()
        );
        println!(
            "       {} MARKET <ticker> <qty>",
            side.to_string().to_lowercase()
        );
        println!(
            "       {} STOP <ticker> <trigger> LIMIT|MARKET <qty> [price]",
            side.to_string().to_lowercase()
        );
        return;
    };

    for event in engine.submit(order) {
        println!("{} {}", event.account(), notify::render(&event));
    }
}

/// Parse the `LIMIT|MARKET|STOP ...` tail of a buy/sell command.
fn parse_order(key: AccountId, side: Side, args: &[&str]) -> Option<Order> {
    match args.first().map(|s| s.to_uppercase()).as_deref() {
        Some("LIMIT") => {
            let symbol = parse_symbol(args.get(1)?)?;
            let qty = args.get(2)?.parse().ok()?;
            let price = parse_price(args.get(3)?)?;
            Some(Order::limit(key, side, symbol, qty, price))
        }
        Some("MARKET") => {
            let symbol = parse_symbol(args.get(1)?)?;
            let qty = args.get(2)?.parse().ok()?;
            Some(Order::market(key, side, symbol, qty))
        }
        Some("STOP") => {
            let symbol = parse_symbol(args.get(1)?)?;
            let trigger = parse_price(args.get(2)?)?;
            let child = match args.get(3).map(|s| s.to_uppercase()).as_deref() {
                Some("LIMIT") => {
                    let qty = args.get(4)?.parse().ok()?;
                    let price = parse_price(args.get(5)?)?;
                    Order::limit(key.clone(), side, symbol, qty, price)
                }
                Some("MARKET") => {
                    let qty = args.get(4)?.parse().ok()?;
                    Order::market(key.clone(), side, symbol, qty)
                }
                _ => return None,
            };
            Some(Order::stop(key, side, symbol, trigger, child))
        }
        _ => None,
    }
}

fn handle_cancel(engine: &mut Engine, args: &[&str]) {
    let Some(arg) = args.first() else {
        println!("Usage: cancel <order_id>");
        return;
    };

    let id: u64 = match arg.trim_start_matches('#').parse() {
        Ok(i) => i,
        Err(_) => {
            println!("Invalid order ID: '{}'", arg);
            return;
        }
    };

    let events = engine.cancel(OrderId(id), CancelReason::Other);
    if events.is_empty() {
        println!("Order #{} not found or not live", id);
    }
    for event in events {
        println!("{} {}", event.account(), notify::render(&event));
    }
}

fn handle_board(engine: &Engine, args: &[&str]) {
    match args.first() {
        Some(raw) => match parse_symbol(raw).and_then(|s| engine.book(s)) {
            Some(book) => print!("{}", report::depth_board(book)),
            None => println!("Invalid ticker `{}`.", raw),
        },
        None => print!("{}", report::render_board(engine)),
    }
}

fn parse_symbol(s: &str) -> Option<Symbol> {
    let upper = s.to_uppercase();
    if upper.is_empty() || upper.len() > 8 {
        return None;
    }
    Some(Symbol::new(&upper))
}

fn parse_price(s: &str) -> Option<Price> {
    // Parse as float, convert to cents
    let f: f64 = s.parse().ok()?;
    if f <= 0.0 {
        return None;
    }
    Some(Price((f * 100.0).round() as i64))
}
