//! Market module for binary prediction markets.
//!
//! This module handles:
//! - Market and event types
//! - Normalizing string-or-array encoded fields
//! - The REST client and its fetch primitive
//! - Forward and reverse token resolution with a token cache

pub mod cache;
pub mod client;
pub mod decode;
pub mod types;

pub use cache::TokenCache;
pub use client::{PolymarketClient, DEFAULT_MARKET_LIMIT};
pub use types::{Event, Market, MarketSummary, Outcome, Prices};
