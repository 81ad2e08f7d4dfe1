//! Validation errors and cancellation reasons.

use crate::{AccountId, Symbol};
use thiserror::Error;

/// Why an order submission was rejected before it received an identity.
///
/// Validation failures mutate no state and consume no order id; the
/// message is surfaced verbatim to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("{0} is not a registered trader.")]
    UnknownTrader(AccountId),
    #[error("Invalid ticker `{0}`.")]
    UnknownSymbol(Symbol),
    #[error("Quantity must be greater than 0.")]
    ZeroQuantity,
    #[error("Invalid limit price.")]
    InvalidLimitPrice,
    #[error("Invalid trigger price.")]
    InvalidTriggerPrice,
    #[error("Trigger price must be greater than current price.")]
    TriggerNotAboveMarket,
    #[error("Trigger price must be less than current price.")]
    TriggerNotBelowMarket,
}

/// Why an accepted order was cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CancelReason {
    /// Not enough opposing liquidity for a market order.
    Unfulfillable,
    /// Reserved: the account's position limit is modeled but not enforced,
    /// so no code path currently produces this reason.
    ViolatesPositionLimits,
    /// Any other cancellation (internal primitive).
    Other,
}
