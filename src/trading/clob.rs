//! Credentials and the CLOB-SDK-backed trader.
//!
//! With the `clob` feature, [`create_client`] builds a [`ClobTrader`] on top
//! of `polymarket-client-sdk`. Without it, [`create_client`] fails with
//! [`TradingError::MissingDependency`] and [`ClobTrader`] cannot be constructed.

use std::fmt;

use crate::config::{Config, CLOB_API_URL, POLYGON_CHAIN_ID};
use crate::error::TradingError;

/// Pre-generated L2 API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    /// API key.
    pub key: String,
    /// API secret.
    pub secret: String,
    /// API passphrase.
    pub passphrase: String,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Everything needed to open an authenticated trading session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Wallet private key (hex).
    pub private_key: String,
    /// Optional pre-generated API credentials.
    pub api: Option<ApiCredentials>,
    /// Proxy wallet address holding the funds.
    pub funder: Option<String>,
    /// CLOB API host.
    pub host: String,
    /// Chain ID (137 for Polygon mainnet).
    pub chain_id: u64,
    /// Signature type: 0=EOA, 1=Magic.link, 2=Gnosis Safe.
    pub signature_type: u8,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &"<redacted>")
            .field("api", &self.api)
            .field("funder", &self.funder)
            .field("host", &self.host)
            .field("chain_id", &self.chain_id)
            .field("signature_type", &self.signature_type)
            .finish()
    }
}

impl Credentials {
    /// Credentials for a Polymarket proxy wallet on mainnet.
    pub fn new(private_key: impl Into<String>, funder: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            api: None,
            funder: Some(funder.into()),
            host: CLOB_API_URL.to_string(),
            chain_id: POLYGON_CHAIN_ID,
            signature_type: 2,
        }
    }

    /// Attach pre-generated API credentials.
    pub fn with_api_credentials(
        mut self,
        key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.api = Some(ApiCredentials {
            key: key.into(),
            secret: secret.into(),
            passphrase: passphrase.into(),
        });
        self
    }

    /// Read credentials from config; the private key is required.
    pub fn from_config(config: &Config) -> Result<Self, TradingError> {
        let private_key = config.polymarket_private_key.clone().ok_or_else(|| {
            TradingError::InvalidCredentials("POLYMARKET_PRIVATE_KEY is not set".to_string())
        })?;

        let api = match (
            &config.polymarket_api_key,
            &config.polymarket_api_secret,
            &config.polymarket_api_passphrase,
        ) {
            (Some(key), Some(secret), Some(passphrase)) => Some(ApiCredentials {
                key: key.clone(),
                secret: secret.clone(),
                passphrase: passphrase.clone(),
            }),
            (None, None, None) => None,
            _ => {
                return Err(TradingError::InvalidCredentials(
                    "API key, secret and passphrase must be set together".to_string(),
                ))
            }
        };

        Ok(Self {
            private_key,
            api,
            funder: config.polymarket_funder.clone(),
            host: config.polymarket_clob_url.clone(),
            chain_id: config.polymarket_chain_id,
            signature_type: config.polymarket_signature_type,
        })
    }
}

/// Build an authenticated trader from credentials.
#[cfg(feature = "clob")]
pub fn create_client(credentials: &Credentials) -> Result<ClobTrader, TradingError> {
    ClobTrader::new(credentials)
}

/// Build an authenticated trader from credentials.
///
/// This build has no trading backend; enable the `clob` feature.
#[cfg(not(feature = "clob"))]
pub fn create_client(credentials: &Credentials) -> Result<ClobTrader, TradingError> {
    tracing::debug!(host = %credentials.host, "Trading backend not compiled in");
    Err(TradingError::MissingDependency(
        "polymarket-client-sdk (rebuild with `--features clob`)",
    ))
}

#[cfg(not(feature = "clob"))]
pub use disabled::ClobTrader;

#[cfg(feature = "clob")]
pub use sdk::ClobTrader;

#[cfg(not(feature = "clob"))]
mod disabled {
    use std::convert::Infallible;

    use async_trait::async_trait;

    use crate::error::TradingError;
    use crate::trading::backend::TradingBackend;
    use crate::trading::order::{
        Balance, CancelReport, OpenOrder, OrderAck, OrderArgs, TimeInForce,
    };

    /// Trader placeholder for builds without the `clob` feature; it has no values.
    #[derive(Debug)]
    pub struct ClobTrader {
        never: Infallible,
    }

    #[async_trait]
    impl TradingBackend for ClobTrader {
        type Order = Infallible;

        async fn create_order(&self, _args: &OrderArgs) -> Result<Infallible, TradingError> {
            match self.never {}
        }

        async fn post_order(
            &self,
            order: Infallible,
            _time_in_force: TimeInForce,
        ) -> Result<OrderAck, TradingError> {
            match order {}
        }

        async fn cancel(&self, _order_id: &str) -> Result<CancelReport, TradingError> {
            match self.never {}
        }

        async fn cancel_all(&self) -> Result<CancelReport, TradingError> {
            match self.never {}
        }

        async fn orders(&self) -> Result<Vec<OpenOrder>, TradingError> {
            match self.never {}
        }

        async fn balance(&self) -> Result<Balance, TradingError> {
            match self.never {}
        }
    }
}

#[cfg(feature = "clob")]
mod sdk {
    use std::str::FromStr;

    use alloy::primitives::{Address, U256};
    use alloy::signers::local::PrivateKeySigner;
    use async_trait::async_trait;
    use polymarket_client_sdk::clob::types::request::{BalanceAllowanceRequest, OrdersRequest};
    use polymarket_client_sdk::clob::types::response::{
        BalanceAllowanceResponse, CancelOrdersResponse,
    };
    use polymarket_client_sdk::clob::types::{
        AssetType, OrderType as SdkOrderType, Side as SdkSide, SignatureType,
    };
    use polymarket_client_sdk::clob::{Client as SdkClient, Config as SdkConfig};
    use tracing::{debug, info, warn};

    use super::Credentials;
    use crate::error::TradingError;
    use crate::signing;
    use crate::trading::backend::TradingBackend;
    use crate::trading::order::{
        Balance, CancelReport, OpenOrder, OrderAck, OrderArgs, Side, TimeInForce,
    };

    /// Trader backed by the official Polymarket CLOB SDK.
    ///
    /// Each call opens an authenticated session from the stored signer; the
    /// SDK derives the L2 API key itself.
    pub struct ClobTrader {
        client: SdkClient,
        signer: PrivateKeySigner,
        funder: Option<Address>,
        signature_type: SignatureType,
    }

    impl std::fmt::Debug for ClobTrader {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ClobTrader")
                .field("address", &self.signer.address())
                .field("funder", &self.funder)
                .finish()
        }
    }

    /// Open an authenticated session, via the funder when one is configured.
    macro_rules! authenticated {
        ($trader:expr) => {{
            let trader = $trader;
            let session = if let Some(funder) = trader.funder {
                trader
                    .client
                    .clone()
                    .authentication_builder(&trader.signer)
                    .funder(funder)
                    .signature_type(trader.signature_type)
                    .authenticate()
                    .await
            } else {
                trader
                    .client
                    .clone()
                    .authentication_builder(&trader.signer)
                    .authenticate()
                    .await
            };
            session.map_err(|e| TradingError::Authentication(e.to_string()))?
        }};
    }

    impl ClobTrader {
        pub(super) fn new(credentials: &Credentials) -> Result<Self, TradingError> {
            let signer = signing::create_signer(&credentials.private_key, credentials.chain_id)?;
            let funder = credentials
                .funder
                .as_deref()
                .map(signing::parse_funder)
                .transpose()?;

            let client = SdkClient::new(&credentials.host, SdkConfig::default())
                .map_err(|e| TradingError::Backend(format!("Failed to create CLOB client: {}", e)))?;

            if credentials.api.is_some() {
                warn!("Pre-generated API credentials are ignored; the SDK derives its own");
            }

            info!(address = ?signer.address(), funder = ?funder, "Created CLOB trader");

            Ok(Self {
                client,
                signer,
                funder,
                signature_type: signing::signature_type_from_u8(credentials.signature_type),
            })
        }
    }

    fn backend_err(context: &str, e: impl std::fmt::Display) -> TradingError {
        TradingError::Backend(format!("{}: {}", context, e))
    }

    fn cancel_report(response: CancelOrdersResponse) -> CancelReport {
        CancelReport {
            canceled: response.canceled,
            not_canceled: response.not_canceled,
        }
    }

    fn balance_of(response: BalanceAllowanceResponse) -> Balance {
        Balance {
            balance: response.balance,
            allowances: response
                .allowances
                .iter()
                .map(|(spender, amount)| (spender.to_string(), amount.to_string()))
                .collect(),
        }
    }

    #[async_trait]
    impl TradingBackend for ClobTrader {
        /// Orders are signed inside the posting session, so the prepared
        /// order is just its validated arguments.
        type Order = OrderArgs;

        async fn create_order(&self, args: &OrderArgs) -> Result<OrderArgs, TradingError> {
            U256::from_str(&args.token_id).map_err(|e| {
                TradingError::InvalidParams(format!("token_id is not a CLOB token: {}", e))
            })?;
            Ok(args.clone())
        }

        async fn post_order(
            &self,
            order: OrderArgs,
            time_in_force: TimeInForce,
        ) -> Result<OrderAck, TradingError> {
            let session = authenticated!(self);

            let token_id = U256::from_str(&order.token_id)
                .map_err(|e| TradingError::InvalidParams(e.to_string()))?;
            let side = match order.side {
                Side::Buy => SdkSide::Buy,
                Side::Sell => SdkSide::Sell,
            };
            let order_type = match time_in_force {
                TimeInForce::Gtc => SdkOrderType::GTC,
                TimeInForce::Fok => SdkOrderType::FOK,
                TimeInForce::Fak => SdkOrderType::FAK,
            };

            let built = session
                .limit_order()
                .token_id(token_id)
                .price(order.price)
                .size(order.size)
                .side(side)
                .order_type(order_type)
                .build()
                .await
                .map_err(|e| TradingError::SubmissionFailed(format!("Failed to build order: {}", e)))?;
            let signed = session
                .sign(&self.signer, built)
                .await
                .map_err(|e| TradingError::SubmissionFailed(format!("Failed to sign order: {}", e)))?;
            let response = session
                .post_order(signed)
                .await
                .map_err(|e| TradingError::SubmissionFailed(format!("Failed to post order: {}", e)))?;

            debug!(order_id = %response.order_id, "Order posted");

            Ok(OrderAck {
                order_id: response.order_id,
                status: format!("{:?}", response.status),
                success: true,
            })
        }

        async fn cancel(&self, order_id: &str) -> Result<CancelReport, TradingError> {
            let session = authenticated!(self);
            let response = session
                .cancel_order(order_id)
                .await
                .map_err(|e| TradingError::CancelFailed {
                    order_id: order_id.to_string(),
                    reason: e.to_string(),
                })?;

            Ok(cancel_report(response))
        }

        async fn cancel_all(&self) -> Result<CancelReport, TradingError> {
            let session = authenticated!(self);
            let response = session
                .cancel_all_orders()
                .await
                .map_err(|e| TradingError::CancelFailed {
                    order_id: "all".to_string(),
                    reason: e.to_string(),
                })?;

            Ok(cancel_report(response))
        }

        async fn orders(&self) -> Result<Vec<OpenOrder>, TradingError> {
            let session = authenticated!(self);
            let request = OrdersRequest::builder().build();
            let page = session
                .orders(&request, None)
                .await
                .map_err(|e| backend_err("Failed to list orders", e))?;

            Ok(page
                .data
                .into_iter()
                .map(|o| OpenOrder {
                    id: o.id.clone(),
                    status: format!("{:?}", o.status),
                    asset_id: o.asset_id.to_string(),
                    side: format!("{:?}", o.side),
                    price: o.price,
                    original_size: o.original_size,
                    size_matched: o.size_matched,
                })
                .collect())
        }

        async fn balance(&self) -> Result<Balance, TradingError> {
            let session = authenticated!(self);
            let request = BalanceAllowanceRequest::builder()
                .asset_type(AssetType::Collateral)
                .build();
            let response = session
                .balance_allowance(request)
                .await
                .map_err(|e| backend_err("Failed to get balance", e))?;

            Ok(balance_of(response))
        }
    }

}
