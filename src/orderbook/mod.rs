//! Order book module.
//!
//! This module handles:
//! - Order book and spread types
//! - Book and spread queries on [`crate::market::PolymarketClient`]

pub mod book;
pub mod types;

pub use types::{OrderBook, PriceLevel, Spread};
