//! Order book types and data structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market::decode::null_default;

/// Single price level in an order book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price at this level.
    pub price: Decimal,
    /// Total size available at this price.
    pub size: Decimal,
}

impl PriceLevel {
    /// Create a new price level.
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }
}

/// Order book snapshot for one token, as returned by the CLOB API.
///
/// Levels are kept in upstream order; the first entry of each side is
/// taken as the top of book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Market (condition) ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    /// Token ID this book represents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    /// Bid levels.
    #[serde(default, deserialize_with = "null_default")]
    pub bids: Vec<PriceLevel>,
    /// Ask levels.
    #[serde(default, deserialize_with = "null_default")]
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    /// Price of the first bid.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Price of the first ask.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Top-of-book spread, with 0 standing in for a missing bid and 1 for
    /// a missing ask.
    pub fn spread(&self) -> Spread {
        Spread::new(
            self.best_bid().unwrap_or(Decimal::ZERO),
            self.best_ask().unwrap_or(Decimal::ONE),
        )
    }

    /// Check if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Best bid, best ask and their difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    /// Best bid price.
    pub bid: Decimal,
    /// Best ask price.
    pub ask: Decimal,
    /// `ask - bid`; negative only if the upstream book is crossed.
    pub spread: Decimal,
}

impl Spread {
    /// Placeholder returned when a market has no resolvable token.
    pub const NO_LIQUIDITY: Spread = Spread {
        bid: Decimal::ZERO,
        ask: Decimal::ZERO,
        spread: Decimal::ONE,
    };

    /// Spread between `bid` and `ask`.
    pub fn new(bid: Decimal, ask: Decimal) -> Self {
        Self {
            bid,
            ask,
            spread: ask - bid,
        }
    }
}
