//! Order book and spread queries against the CLOB API.

use tracing::{debug, instrument};

use super::types::{OrderBook, Spread};
use crate::error::Result;
use crate::market::client::Api;
use crate::market::{Outcome, PolymarketClient};

impl PolymarketClient {
    /// Get the order book for a CLOB token (see [`PolymarketClient::get_token_id`]).
    #[instrument(skip(self))]
    pub async fn get_orderbook(&self, token_id: &str) -> Result<OrderBook> {
        let book: Option<OrderBook> = self
            .get_json(Api::Clob, "book", &[("token_id", token_id)])
            .await?;
        let book = book.unwrap_or_default();

        debug!(bids = book.bids.len(), asks = book.asks.len(), "Fetched order book");
        Ok(book)
    }

    /// Top-of-book spread for one outcome, or `None` if no token resolves.
    pub async fn find_spread(
        &self,
        market_id: &str,
        outcome: impl Into<Outcome>,
    ) -> Result<Option<Spread>> {
        self.spread_for(market_id, outcome.into()).await
    }

    /// Top-of-book spread for one outcome.
    ///
    /// Returns [`Spread::NO_LIQUIDITY`] when no token resolves.
    pub async fn get_spread(&self, market_id: &str, outcome: impl Into<Outcome>) -> Result<Spread> {
        Ok(self
            .spread_for(market_id, outcome.into())
            .await?
            .unwrap_or(Spread::NO_LIQUIDITY))
    }

    #[instrument(skip(self))]
    async fn spread_for(&self, market_id: &str, outcome: Outcome) -> Result<Option<Spread>> {
        let Some(token_id) = self.resolve_token(market_id, outcome).await? else {
            debug!("No token for market outcome");
            return Ok(None);
        };

        let book = self.get_orderbook(&token_id).await?;
        Ok(Some(book.spread()))
    }
}
