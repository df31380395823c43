//! Token ID → market summary cache.

use dashmap::DashMap;
use tracing::debug;

use super::types::MarketSummary;

/// Unbounded cache of reverse token lookups.
///
/// Entries live until [`TokenCache::clear`] or the owning client is dropped.
/// There is no TTL and no eviction.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: DashMap<String, MarketSummary>,
}

impl TokenCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached summary for a token.
    pub fn get(&self, token_id: &str) -> Option<MarketSummary> {
        self.entries.get(token_id).map(|entry| entry.value().clone())
    }

    /// Store (or replace) the summary for a token.
    pub fn insert(&self, token_id: impl Into<String>, summary: MarketSummary) {
        self.entries.insert(token_id.into(), summary);
    }

    /// Check whether a token is cached.
    pub fn contains(&self, token_id: &str) -> bool {
        self.entries.contains_key(token_id)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
        debug!("Token cache cleared");
    }

    /// Number of cached tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
