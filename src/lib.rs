//! Thin async client for Polymarket's public REST APIs.
//!
//! Wraps three HTTP services (market metadata from gamma, order books from
//! the CLOB, activity from the data API) behind a single
//! [`PolymarketClient`], and forwards order placement to an external,
//! already-authenticated trading client.
//!
//! ```no_run
//! # async fn run() -> polymarket_sdk::Result<()> {
//! use polymarket_sdk::{format::format_price, PolymarketClient};
//!
//! let client = PolymarketClient::from_env()?;
//! let prices = client.get_price("1230810").await?;
//! println!("YES {}  NO {}", format_price(prices.yes), format_price(prices.no));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Market/event lookup, prices and token resolution
//! - [`orderbook`]: Order books and bid/ask spreads
//! - [`activity`]: Trades, positions and leaderboard records
//! - [`trading`]: Order placement through a trading backend
//! - [`format`]: Cents formatting and parsing
//! - [`metrics`]: Metrics facade

pub mod activity;
pub mod config;
pub mod error;
pub mod format;
pub mod market;
pub mod metrics;
pub mod orderbook;
#[cfg(feature = "clob")]
pub mod signing;
pub mod trading;

pub use config::Config;
pub use error::{PriceError, Result, SdkError, TradingError};
pub use market::{Event, Market, MarketSummary, Outcome, PolymarketClient, Prices, TokenCache};
pub use orderbook::{OrderBook, PriceLevel, Spread};
