//! Activity queries against the data API: trades, positions, leaderboard.
//!
//! Records are passed through untouched as raw JSON objects.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::market::client::Api;
use crate::market::{Outcome, PolymarketClient};

/// Default number of trades returned by [`PolymarketClient::get_trades`].
pub const DEFAULT_TRADES_LIMIT: u32 = 50;

/// Default number of traders returned by [`PolymarketClient::get_leaderboard`].
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 20;

/// One upstream record, as returned by the API.
pub type RawRecord = Map<String, Value>;

impl PolymarketClient {
    /// Recent trades on a market's YES token.
    ///
    /// Empty when the market has no token to query.
    #[instrument(skip(self))]
    pub async fn get_trades(&self, market_id: &str, limit: u32) -> Result<Vec<RawRecord>> {
        let Some(token_id) = self.resolve_token(market_id, Outcome::Yes).await? else {
            debug!("No YES token, returning no trades");
            return Ok(Vec::new());
        };

        let limit = limit.to_string();
        self.get_records("trades", &[("asset_id", token_id.as_str()), ("limit", limit.as_str())])
            .await
    }

    /// Positions held by a wallet address.
    #[instrument(skip(self))]
    pub async fn get_positions(&self, address: &str) -> Result<Vec<RawRecord>> {
        self.get_records("positions", &[("user", address)]).await
    }

    /// Top traders by profit.
    #[instrument(skip(self))]
    pub async fn get_leaderboard(&self, limit: u32) -> Result<Vec<RawRecord>> {
        let limit = limit.to_string();
        self.get_records("leaderboard", &[("limit", limit.as_str())])
            .await
    }

    async fn get_records(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<RawRecord>> {
        let records: Option<Vec<RawRecord>> = self.get_json(Api::Data, path, query).await?;
        let records = records.unwrap_or_default();
        debug!(path, count = records.len(), "Fetched records");
        Ok(records)
    }
}
