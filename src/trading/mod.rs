//! Trading module for order placement through an external CLOB client.
//!
//! This module handles:
//! - Order arguments and backend responses
//! - The `TradingBackend` capability and its SDK/mock implementations
//! - Forwarding helpers for placing and cancelling orders

pub mod backend;
pub mod clob;
pub mod execution;
pub mod mock;
pub mod order;

pub use backend::TradingBackend;
pub use clob::{create_client, ApiCredentials, ClobTrader, Credentials};
pub use execution::{cancel_all, cancel_order, get_balance, get_open_orders, place_order};
pub use mock::{MockCall, MockConfig, MockTradingBackend};
pub use order::{Balance, CancelReport, OpenOrder, OrderAck, OrderArgs, Side, TimeInForce};
