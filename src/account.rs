//! Trader accounts and the registration map.
//!
//! Positions are mutated only as a side effect of fills; the engine is the
//! sole caller of [`Accounts::apply_fill`].

use crate::{AccountId, Quantity, Symbol};
use rustc_hash::FxHashMap;

/// A registered trader: a position limit and one signed position per
/// valid symbol.
///
/// The position limit is advisory data; it is never checked against any
/// operation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    key: AccountId,
    position_limit: Quantity,
    positions: FxHashMap<Symbol, i64>,
}

impl Account {
    fn new(key: AccountId, position_limit: Quantity, symbols: &[Symbol]) -> Self {
        let positions = symbols.iter().map(|s| (*s, 0)).collect();
        Self {
            key,
            position_limit,
            positions,
        }
    }

    pub fn key(&self) -> &AccountId {
        &self.key
    }

    pub fn position_limit(&self) -> Quantity {
        self.position_limit
    }

    /// Signed position for a symbol: positive = long, negative = short.
    /// Unknown symbols read as flat.
    pub fn position(&self, symbol: Symbol) -> i64 {
        self.positions.get(&symbol).copied().unwrap_or(0)
    }

    /// All non-zero positions, sorted by symbol.
    pub fn open_positions(&self) -> Vec<(Symbol, i64)> {
        let mut open: Vec<(Symbol, i64)> = self
            .positions
            .iter()
            .filter(|(_, qty)| **qty != 0)
            .map(|(sym, qty)| (*sym, *qty))
            .collect();
        open.sort_by_key(|(sym, _)| sym.as_str().to_owned());
        open
    }

    fn apply_fill(&mut self, symbol: Symbol, delta: i64) {
        *self.positions.entry(symbol).or_insert(0) += delta;
    }
}

/// Registry of all trader accounts.
#[derive(Clone, Debug, Default)]
pub struct Accounts {
    map: FxHashMap<AccountId, Account>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account, creating zeroed positions for every valid
    /// symbol. Idempotent: re-registering returns the existing account
    /// without resetting anything.
    pub fn register(
        &mut self,
        key: AccountId,
        position_limit: Quantity,
        symbols: &[Symbol],
    ) -> &Account {
        self.map
            .entry(key.clone())
            .or_insert_with(|| Account::new(key, position_limit, symbols))
    }

    pub fn contains(&self, key: &AccountId) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &AccountId) -> Option<&Account> {
        self.map.get(key)
    }

    /// Adjust a trader's position as a side effect of a fill.
    ///
    /// # Panics
    ///
    /// Panics if the account is unknown. Fills only happen for validated
    /// orders, whose owners are registered.
    pub(crate) fn apply_fill(&mut self, key: &AccountId, symbol: Symbol, delta: i64) {
        self.map
            .get_mut(key)
            .expect("invariant: fills belong to registered accounts")
            .apply_fill(symbol, delta);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
