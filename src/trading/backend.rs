//! The trading capability this crate delegates to.

use async_trait::async_trait;

use super::order::{Balance, CancelReport, OpenOrder, OrderAck, OrderArgs, TimeInForce};
use crate::error::TradingError;

/// An authenticated trading client.
///
/// Signing, authentication and order construction all live behind this
/// trait. The SDK-backed implementation is [`super::ClobTrader`];
/// [`super::MockTradingBackend`] stands in for it in tests.
#[async_trait]
pub trait TradingBackend: Send + Sync {
    /// A built, signed order ready to post.
    type Order: Send;

    /// Build and sign a limit order.
    async fn create_order(&self, args: &OrderArgs) -> Result<Self::Order, TradingError>;

    /// Post a signed order.
    async fn post_order(
        &self,
        order: Self::Order,
        time_in_force: TimeInForce,
    ) -> Result<OrderAck, TradingError>;

    /// Cancel one order.
    async fn cancel(&self, order_id: &str) -> Result<CancelReport, TradingError>;

    /// Cancel every open order.
    async fn cancel_all(&self) -> Result<CancelReport, TradingError>;

    /// List open orders.
    async fn orders(&self) -> Result<Vec<OpenOrder>, TradingError>;

    /// Collateral balance.
    async fn balance(&self) -> Result<Balance, TradingError>;
}
