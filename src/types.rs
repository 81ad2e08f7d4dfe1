//! Core types: Price, Quantity, Timestamp, OrderId, AccountId, Symbol

use std::fmt;

/// Price in smallest units (cents).
///
/// `Price(52_00)` represents $52.00. Using fixed-point avoids
/// floating-point errors in financial calculations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = (self.0 % 100).abs();
        if self.0 < 0 {
            write!(f, "-${}.{:02}", dollars.abs(), cents)
        } else {
            write!(f, "${}.{:02}", dollars, cents)
        }
    }
}

/// Quantity of shares/contracts. Always positive.
pub type Quantity = u64;

/// Logical timestamp assigned at processing time.
/// Monotonically increasing; what makes "earlier wins ties" meaningful.
pub type Timestamp = u64;

/// Unique order identifier assigned by the engine at submission.
///
/// Identifiers are monotonically increasing across all order variants
/// and gap-free in processing order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque trader key: the external chat user handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(key: impl Into<String>) -> Self {
        AccountId(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(key: &str) -> Self {
        AccountId(key.to_owned())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Ticker symbol, stored inline (up to 8 ASCII bytes) so it is `Copy`
/// and cheap to use as a hash map key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    bytes: [u8; 8],
    len: u8,
}

impl Symbol {
    /// Create a symbol from a ticker string.
    ///
    /// # Panics
    ///
    /// Panics if the string is empty or longer than 8 bytes.
    pub fn new(ticker: &str) -> Self {
        assert!(
            !ticker.is_empty() && ticker.len() <= 8,
            "symbol must be 1-8 bytes, got {:?}",
            ticker
        );
        let mut bytes = [0u8; 8];
        bytes[..ticker.len()].copy_from_slice(ticker.as_bytes());
        Self {
            bytes,
            len: ticker.len() as u8,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize])
            .expect("invariant: symbol constructed from valid UTF-8")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_ordering() {
        assert!(Price(100) < Price(200));
        assert!(Price(-50) < Price(50));
        assert_eq!(Price(100), Price(100));
    }

    #[test]
    fn price_display() {
        assert_eq!(format!("{}", Price(52_00)), "$52.00");
        assert_eq!(format!("{}", Price(100_50)), "$100.50");
        assert_eq!(format!("{}", Price(5)), "$0.05");
        assert_eq!(format!("{}", Price(-250)), "-$2.50");
    }

    #[test]
    fn order_id_display() {
        assert_eq!(format!("{}", OrderId(42)), "#42");
    }

    #[test]
    fn account_id_display() {
        assert_eq!(format!("{}", AccountId::from("alice")), "@alice");
    }

    #[test]
    fn symbol_roundtrip() {
        let sym = Symbol::new("TAME");
        assert_eq!(sym.as_str(), "TAME");
        assert_eq!(format!("{}", sym), "TAME");
        assert_eq!(format!("{:<8}", sym), "TAME    ");
    }

    #[test]
    fn symbol_equality_and_hash_key() {
        assert_eq!(Symbol::new("CRZY"), Symbol::new("CRZY"));
        assert_ne!(Symbol::new("CRZY"), Symbol::new("TAME"));
    }

    #[test]
    #[should_panic(expected = "symbol must be 1-8 bytes")]
    fn symbol_too_long_panics() {
        Symbol::new("TOOLONGSYM");
    }
}
