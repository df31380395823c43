//! Order placement and account queries forwarded to a trading backend.

use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument};

use super::backend::TradingBackend;
use super::order::{Balance, CancelReport, OpenOrder, OrderAck, OrderArgs, Side, TimeInForce};
use crate::error::TradingError;
use crate::metrics;

/// Place a good-till-cancelled limit order.
///
/// `price` is a probability in (0, 1); `size` is a share count.
#[instrument(skip(client))]
pub async fn place_order<B: TradingBackend>(
    client: &B,
    token_id: &str,
    side: Side,
    price: Decimal,
    size: Decimal,
) -> Result<OrderAck, TradingError> {
    let args = OrderArgs::new(token_id, side, price, size);
    args.validate().map_err(TradingError::InvalidParams)?;

    debug!("Creating order");

    let result = async {
        let order = client.create_order(&args).await?;
        client.post_order(order, TimeInForce::Gtc).await
    }
    .await;

    match &result {
        Ok(ack) => {
            metrics::inc_orders_submitted();
            info!(
                order_id = %ack.order_id,
                status = %ack.status,
                token_id = %token_id,
                "Order submitted successfully"
            );
        }
        Err(e) => {
            metrics::inc_orders_failed();
            error!(error = %e, token_id = %token_id, "Order submission failed");
        }
    }

    result
}

/// Cancel one order by ID.
#[instrument(skip(client))]
pub async fn cancel_order<B: TradingBackend>(
    client: &B,
    order_id: &str,
) -> Result<CancelReport, TradingError> {
    let report = client.cancel(order_id).await?;
    info!(
        canceled = report.canceled.len(),
        not_canceled = report.not_canceled.len(),
        "Cancel request complete"
    );
    Ok(report)
}

/// Cancel every open order for the account.
#[instrument(skip(client))]
pub async fn cancel_all<B: TradingBackend>(client: &B) -> Result<CancelReport, TradingError> {
    let report = client.cancel_all().await?;
    info!(count = report.canceled.len(), "Cancelled all open orders");
    Ok(report)
}

/// List the account's open orders.
#[instrument(skip(client))]
pub async fn get_open_orders<B: TradingBackend>(
    client: &B,
) -> Result<Vec<OpenOrder>, TradingError> {
    client.orders().await
}

/// Collateral balance of the account.
#[instrument(skip(client))]
pub async fn get_balance<B: TradingBackend>(client: &B) -> Result<Balance, TradingError> {
    client.balance().await
}
