//! Polymarket REST client: fetch primitive, market lookups and token resolution.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::Result;
use crate::metrics;

use super::cache::TokenCache;
use super::types::{Event, Market, MarketSummary, Outcome, Prices};

/// Default number of markets fetched by search and trending.
pub const DEFAULT_MARKET_LIMIT: u32 = 10;

/// Upstream API a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Api {
    /// Market and event metadata.
    Gamma,
    /// Order books.
    Clob,
    /// Trades, positions, leaderboard.
    Data,
}

impl Api {
    fn label(self) -> &'static str {
        match self {
            Api::Gamma => "gamma",
            Api::Clob => "clob",
            Api::Data => "data",
        }
    }
}

/// Read-only client for the gamma, CLOB and data APIs.
///
/// Cheap to clone: clones share the connection pool and the token cache.
#[derive(Debug, Clone)]
pub struct PolymarketClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for the gamma API.
    gamma_url: String,
    /// Base URL for the CLOB API.
    clob_url: String,
    /// Base URL for the data API.
    data_url: String,
    /// Reverse token lookup cache.
    token_cache: Arc<TokenCache>,
}

impl PolymarketClient {
    /// Create a new client from config.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.http_user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            gamma_url: config.polymarket_gamma_url.trim_end_matches('/').to_string(),
            clob_url: config.polymarket_clob_url.trim_end_matches('/').to_string(),
            data_url: config.polymarket_data_url.trim_end_matches('/').to_string(),
            token_cache: Arc::new(TokenCache::new()),
        })
    }

    /// Create a client from environment configuration.
    pub fn from_env() -> Result<Self> {
        let config = Config::load()?;
        Self::new(&config)
    }

    /// Use `cache` for reverse token lookups instead of a private one.
    pub fn with_token_cache(mut self, cache: Arc<TokenCache>) -> Self {
        self.token_cache = cache;
        self
    }

    /// The reverse token lookup cache.
    pub fn token_cache(&self) -> &Arc<TokenCache> {
        &self.token_cache
    }

    /// Get the gamma base URL.
    pub fn gamma_url(&self) -> &str {
        &self.gamma_url
    }

    /// Get the CLOB base URL.
    pub fn clob_url(&self) -> &str {
        &self.clob_url
    }

    /// Get the data API base URL.
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Issue one GET and decode the JSON body.
    ///
    /// Error statuses, timeouts and undecodable bodies are returned as-is;
    /// there is no retry.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        api: Api,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let base = match api {
            Api::Gamma => &self.gamma_url,
            Api::Clob => &self.clob_url,
            Api::Data => &self.data_url,
        };
        let url = format!("{}/{}", base, path);

        debug!(url = %url, ?query, "GET");
        let start = Instant::now();

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;

        metrics::record_http_latency(start, api.label());

        Ok(serde_json::from_slice(&body)?)
    }

    /// Get market info by ID, or `None` if no market has that ID.
    #[instrument(skip(self))]
    pub async fn get_market(&self, market_id: &str) -> Result<Option<Market>> {
        let markets: Option<Vec<Market>> = self
            .get_json(Api::Gamma, "markets", &[("id", market_id)])
            .await?;
        Ok(first(markets))
    }

    /// Get an event (with its markets) by URL slug.
    #[instrument(skip(self))]
    pub async fn get_event(&self, slug: &str) -> Result<Option<Event>> {
        let events: Option<Vec<Event>> = self
            .get_json(Api::Gamma, "events", &[("slug", slug)])
            .await?;
        Ok(first(events))
    }

    /// Search active markets whose question contains `query` (case-insensitive).
    ///
    /// Only the first `limit` active markets are fetched; the keyword filter
    /// runs locally over that page.
    #[instrument(skip(self))]
    pub async fn search_markets(&self, query: &str, limit: u32) -> Result<Vec<Market>> {
        let limit = limit.to_string();
        let markets: Option<Vec<Market>> = self
            .get_json(
                Api::Gamma,
                "markets",
                &[("_limit", limit.as_str()), ("active", "true"), ("closed", "false")],
            )
            .await?;

        let needle = query.to_lowercase();
        let matches: Vec<Market> = markets
            .unwrap_or_default()
            .into_iter()
            .filter(|m| m.question.to_lowercase().contains(&needle))
            .collect();

        debug!(count = matches.len(), "Search complete");
        Ok(matches)
    }

    /// Get active markets ordered by volume, highest first.
    #[instrument(skip(self))]
    pub async fn get_trending(&self, limit: u32) -> Result<Vec<Market>> {
        let limit = limit.to_string();
        let markets: Option<Vec<Market>> = self
            .get_json(
                Api::Gamma,
                "markets",
                &[
                    ("_limit", limit.as_str()),
                    ("active", "true"),
                    ("closed", "false"),
                    ("order", "volume"),
                    ("ascending", "false"),
                ],
            )
            .await?;
        Ok(markets.unwrap_or_default())
    }

    /// Current YES/NO prices, or `None` if the market does not exist.
    #[instrument(skip(self))]
    pub async fn find_price(&self, market_id: &str) -> Result<Option<Prices>> {
        match self.get_market(market_id).await? {
            Some(market) => Ok(Some(market.prices()?)),
            None => Ok(None),
        }
    }

    /// Current YES/NO prices; both zero if the market does not exist.
    pub async fn get_price(&self, market_id: &str) -> Result<Prices> {
        Ok(self.find_price(market_id).await?.unwrap_or_default())
    }

    /// CLOB token ID for one outcome of a market.
    ///
    /// `outcome` accepts an [`Outcome`] or a label; see [`Outcome::from`].
    pub async fn get_token_id(
        &self,
        market_id: &str,
        outcome: impl Into<Outcome>,
    ) -> Result<Option<String>> {
        self.resolve_token(market_id, outcome.into()).await
    }

    #[instrument(skip(self))]
    pub(crate) async fn resolve_token(
        &self,
        market_id: &str,
        outcome: Outcome,
    ) -> Result<Option<String>> {
        let Some(market) = self.get_market(market_id).await? else {
            return Ok(None);
        };
        Ok(market.token_id(outcome).map(str::to_string))
    }

    /// Reverse lookup: market details for a token ID.
    ///
    /// Results are cached for the lifetime of the token cache; a cached
    /// summary is returned without any request.
    #[instrument(skip(self))]
    pub async fn get_market_by_token(&self, token_id: &str) -> Result<Option<MarketSummary>> {
        if let Some(summary) = self.token_cache.get(token_id) {
            metrics::inc_token_cache_hits();
            debug!("Token cache hit");
            return Ok(Some(summary));
        }

        metrics::inc_token_cache_misses();
        self.lookup_market_by_token(token_id).await
    }

    /// Reverse lookup that skips the cache read and overwrites the entry.
    #[instrument(skip(self))]
    pub async fn refresh_market_by_token(&self, token_id: &str) -> Result<Option<MarketSummary>> {
        self.lookup_market_by_token(token_id).await
    }

    async fn lookup_market_by_token(&self, token_id: &str) -> Result<Option<MarketSummary>> {
        let markets: Option<Vec<Market>> = self
            .get_json(Api::Gamma, "markets", &[("clob_token_ids", token_id)])
            .await?;
        let Some(market) = first(markets) else {
            return Ok(None);
        };

        let outcome = market.outcome_of(token_id).unwrap_or_else(|| {
            warn!(
                market_id = %market.id,
                tokens = ?market.clob_token_ids,
                "Token is not in the market's token pair, labelling it NO"
            );
            Outcome::No
        });

        let summary = MarketSummary::new(&market, outcome);
        self.token_cache.insert(token_id, summary.clone());
        Ok(Some(summary))
    }
}

fn first<T>(items: Option<Vec<T>>) -> Option<T> {
    items.and_then(|items| items.into_iter().next())
}
