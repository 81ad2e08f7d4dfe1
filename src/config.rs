//! Engine configuration: fixed at startup, immutable afterwards.

use crate::{Price, Quantity, Symbol};

/// Process-wide constants for one engine instance.
///
/// The symbol set, starting price, and default position limit are fixed
/// when the engine is built and never change at runtime.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// The full set of tradable symbols.
    pub symbols: Vec<Symbol>,
    /// Last-traded price each instrument starts at.
    pub starting_price: Price,
    /// Position limit assigned to every account at registration
    /// (advisory only, never enforced).
    pub default_position_limit: Quantity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbols: vec![Symbol::new("CRZY"), Symbol::new("TAME")],
            starting_price: Price(50_00),
            default_position_limit: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.symbols.len(), 2);
        assert!(config.symbols.contains(&Symbol::new("TAME")));
        assert_eq!(config.starting_price, Price(50_00));
        assert_eq!(config.default_position_limit, 100_000);
    }
}
