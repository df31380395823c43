//! Unified error types for the SDK.

use thiserror::Error;

/// Unified error type for the SDK.
///
/// Transport and decode failures are wrapped as-is; "not found" is never an
/// error and is reported as `None` by the lookup operations instead.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// HTTP request error (connect, timeout, error status, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Price parsing error.
    #[error("price error: {0}")]
    Price(#[from] PriceError),

    /// Trading/order error.
    #[error("trading error: {0}")]
    Trading(#[from] TradingError),
}

/// Price parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a recognizable price.
    #[error("invalid price: {input:?}")]
    Invalid {
        /// The rejected input.
        input: String,
    },
}

impl PriceError {
    pub(crate) fn invalid(input: impl Into<String>) -> Self {
        PriceError::Invalid {
            input: input.into(),
        }
    }
}

/// Trading and order delegation errors.
#[derive(Error, Debug)]
pub enum TradingError {
    /// The trading backend is not compiled in.
    #[error("missing dependency: {0}")]
    MissingDependency(&'static str),

    /// Credentials could not be turned into a signer or address.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Invalid order parameters.
    #[error("invalid order parameters: {0}")]
    InvalidParams(String),

    /// Authentication against the trading API failed.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Order submission failed.
    #[error("order submission failed: {0}")]
    SubmissionFailed(String),

    /// Failed to cancel order.
    #[error("failed to cancel order {order_id}: {reason}")]
    CancelFailed {
        /// Order ID that failed to cancel (`all` for cancel-all).
        order_id: String,
        /// Reason for failure.
        reason: String,
    },

    /// Any other failure surfaced by the backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_error_display_quotes_input() {
        let err = PriceError::invalid("abc");
        assert_eq!(err.to_string(), "invalid price: \"abc\"");
    }

    #[test]
    fn trading_error_converts_into_sdk_error() {
        let err: SdkError = TradingError::MissingDependency("polymarket-client-sdk").into();
        assert!(matches!(err, SdkError::Trading(TradingError::MissingDependency(_))));
        assert_eq!(
            err.to_string(),
            "trading error: missing dependency: polymarket-client-sdk"
        );
    }
}
