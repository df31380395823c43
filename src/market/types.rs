//! Market-related types for binary prediction markets.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::decode::{json_list, null_default, parse_decimal, string_or_number};
use crate::error::PriceError;

/// One side of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// YES token (index 0 of `clobTokenIds`).
    #[strum(serialize = "YES")]
    #[default]
    Yes,
    /// NO token (index 1 of `clobTokenIds`).
    #[strum(serialize = "NO")]
    No,
}

impl Outcome {
    /// Position of this outcome in a `[YES, NO]` token pair.
    pub fn index(&self) -> usize {
        match self {
            Outcome::Yes => 0,
            Outcome::No => 1,
        }
    }
}

/// Case-insensitive `"yes"` is [`Outcome::Yes`]; every other label is [`Outcome::No`].
impl From<&str> for Outcome {
    fn from(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("yes") {
            Outcome::Yes
        } else {
            Outcome::No
        }
    }
}

/// Market record from the gamma API.
///
/// Only the fields the SDK reads are typed; everything else the API returns
/// is kept in [`Market::extra`] and written back out on serialization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Market {
    /// Market ID (numeric string like "1230810").
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Market question text.
    #[serde(default, deserialize_with = "null_default")]
    pub question: String,
    /// Market slug.
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    /// End date (ISO format).
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    /// Whether the market is accepting trades.
    #[serde(default)]
    pub active: Option<bool>,
    /// Whether the market is closed.
    #[serde(default)]
    pub closed: Option<bool>,
    /// Outcome labels, normally `["Yes", "No"]`.
    #[serde(default, deserialize_with = "json_list")]
    pub outcomes: Vec<String>,
    /// Outcome prices as decimal strings, `[yes, no]`.
    #[serde(rename = "outcomePrices", default, deserialize_with = "json_list")]
    pub outcome_prices: Vec<String>,
    /// CLOB token IDs, `[YES, NO]`.
    #[serde(rename = "clobTokenIds", default, deserialize_with = "json_list")]
    pub clob_token_ids: Vec<String>,
    /// Remaining upstream fields, untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Market {
    /// Current YES/NO prices.
    ///
    /// Missing entries default to zero; a non-numeric entry is an error.
    pub fn prices(&self) -> Result<Prices, PriceError> {
        let price_at = |index: usize| -> Result<Decimal, PriceError> {
            match self.outcome_prices.get(index) {
                Some(raw) => parse_decimal(raw).ok_or_else(|| PriceError::invalid(raw.as_str())),
                None => Ok(Decimal::ZERO),
            }
        };

        Ok(Prices {
            yes: price_at(0)?,
            no: price_at(1)?,
        })
    }

    /// Get the token ID for a given outcome.
    pub fn token_id(&self, outcome: Outcome) -> Option<&str> {
        self.clob_token_ids.get(outcome.index()).map(String::as_str)
    }

    /// Which side of this market a token belongs to, if either.
    pub fn outcome_of(&self, token_id: &str) -> Option<Outcome> {
        [Outcome::Yes, Outcome::No]
            .into_iter()
            .find(|outcome| self.token_id(*outcome) == Some(token_id))
    }

    /// Traded volume, when the API reports one.
    pub fn volume(&self) -> Option<Decimal> {
        match self.extra.get("volume")? {
            Value::String(s) => parse_decimal(s),
            Value::Number(n) => parse_decimal(&n.to_string()),
            _ => None,
        }
    }

    /// Parsed end date.
    pub fn end_time(&self) -> Option<OffsetDateTime> {
        self.end_date
            .as_deref()
            .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok())
    }
}

/// Event record from the gamma API: a group of related markets.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Event {
    /// Event ID.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// URL slug, e.g. "trump-election-2024".
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    /// Event title.
    #[serde(default)]
    pub title: Option<String>,
    /// Markets belonging to this event.
    #[serde(default, deserialize_with = "null_default")]
    pub markets: Vec<Market>,
    /// Remaining upstream fields, untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// YES/NO prices of a market, each a probability in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    /// YES price.
    pub yes: Decimal,
    /// NO price.
    pub no: Decimal,
}

/// Market details resolved from a token ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Market question text.
    pub question: String,
    /// Which side the token represents.
    pub outcome: Outcome,
    /// Market slug.
    pub slug: String,
    /// Market ID.
    pub market_id: String,
    /// End date (ISO format), empty when unknown.
    #[serde(rename = "endDate")]
    pub end_date: String,
}

impl MarketSummary {
    /// Build a summary for `market` labelled with `outcome`.
    pub fn new(market: &Market, outcome: Outcome) -> Self {
        let question = if market.question.is_empty() {
            "Unknown".to_string()
        } else {
            market.question.clone()
        };

        Self {
            question,
            outcome,
            slug: market.slug.clone(),
            market_id: market.id.clone(),
            end_date: market.end_date.clone().unwrap_or_default(),
        }
    }
}
