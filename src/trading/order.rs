//! Order arguments and the responses handed back by a trading backend.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    #[strum(to_string = "BUY", serialize = "buy", serialize = "Buy")]
    Buy,
    /// Sell order.
    #[strum(to_string = "SELL", serialize = "sell", serialize = "Sell")]
    Sell,
}

/// Order time-in-force.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good-till-cancelled: stays on book until filled or cancelled.
    #[default]
    #[strum(to_string = "GTC", serialize = "gtc")]
    Gtc,
    /// Fill-or-kill: must fill entirely or cancel.
    #[strum(to_string = "FOK", serialize = "fok")]
    Fok,
    /// Fill-and-kill: fill what's available, cancel rest.
    #[strum(to_string = "FAK", serialize = "fak")]
    Fak,
}

/// Limit order arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderArgs {
    /// Token ID to trade.
    pub token_id: String,
    /// Order side (buy/sell).
    pub side: Side,
    /// Limit price as a probability (0.35 = 35 cents).
    pub price: Decimal,
    /// Number of shares.
    pub size: Decimal,
}

impl OrderArgs {
    /// Create limit order arguments.
    pub fn new(token_id: impl Into<String>, side: Side, price: Decimal, size: Decimal) -> Self {
        Self {
            token_id: token_id.into(),
            side,
            price,
            size,
        }
    }

    /// Validate order parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.token_id.is_empty() {
            return Err("token_id is required".to_string());
        }
        if self.price <= Decimal::ZERO || self.price >= Decimal::ONE {
            return Err("price must be between 0 and 1".to_string());
        }
        if self.size <= Decimal::ZERO {
            return Err("size must be positive".to_string());
        }
        Ok(())
    }
}

/// Acknowledgement of a posted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Order ID assigned by the exchange.
    pub order_id: String,
    /// Status reported by the exchange (e.g. "live", "matched").
    pub status: String,
    /// Whether the exchange accepted the order.
    pub success: bool,
}

/// An order resting on the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    /// Order ID.
    pub id: String,
    /// Current status.
    pub status: String,
    /// Token ID.
    pub asset_id: String,
    /// Order side.
    pub side: String,
    /// Limit price.
    pub price: Decimal,
    /// Original size.
    pub original_size: Decimal,
    /// Size already matched.
    pub size_matched: Decimal,
}

/// Collateral balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// USDC balance.
    pub balance: Decimal,
    /// Allowances granted to exchange contracts, keyed by spender address.
    #[serde(default)]
    pub allowances: HashMap<String, String>,
}

/// Outcome of a cancel request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReport {
    /// Order IDs that were cancelled.
    pub canceled: Vec<String>,
    /// Order IDs that were not cancelled, with the reason.
    pub not_canceled: HashMap<String, String>,
}
