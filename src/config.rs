//! SDK configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Gamma (metadata) API base URL.
pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// CLOB (order book) API base URL.
pub const CLOB_API_URL: &str = "https://clob.polymarket.com";

/// Data (activity) API base URL.
pub const DATA_API_URL: &str = "https://data-api.polymarket.com";

/// Polygon mainnet chain ID.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// SDK configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === API Endpoints ===
    /// Gamma API base URL.
    #[serde(default = "default_gamma_url")]
    pub polymarket_gamma_url: String,

    /// CLOB API base URL.
    #[serde(default = "default_clob_url")]
    pub polymarket_clob_url: String,

    /// Data API base URL.
    #[serde(default = "default_data_url")]
    pub polymarket_data_url: String,

    // === HTTP ===
    /// Per-request timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub http_user_agent: String,

    // === Trading Credentials ===
    /// Wallet private key (hex, starts with 0x).
    #[serde(default)]
    pub polymarket_private_key: Option<String>,

    /// Optional pre-generated API key.
    #[serde(default)]
    pub polymarket_api_key: Option<String>,

    /// Optional API secret.
    #[serde(default)]
    pub polymarket_api_secret: Option<String>,

    /// Optional API passphrase.
    #[serde(default)]
    pub polymarket_api_passphrase: Option<String>,

    /// Proxy wallet address holding the funds.
    #[serde(default)]
    pub polymarket_funder: Option<String>,

    /// Signature type: 0=EOA, 1=Magic.link, 2=Gnosis Safe.
    #[serde(default = "default_signature_type")]
    pub polymarket_signature_type: u8,

    /// Chain ID used for order signing.
    #[serde(default = "default_chain_id")]
    pub polymarket_chain_id: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_gamma_url() -> String {
    GAMMA_API_URL.to_string()
}

fn default_clob_url() -> String {
    CLOB_API_URL.to_string()
}

fn default_data_url() -> String {
    DATA_API_URL.to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("polymarket-rust/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_signature_type() -> u8 {
    2 // Gnosis Safe, used by Polymarket proxy wallets
}

fn default_chain_id() -> u64 {
    POLYGON_CHAIN_ID
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            polymarket_gamma_url: default_gamma_url(),
            polymarket_clob_url: default_clob_url(),
            polymarket_data_url: default_data_url(),
            http_timeout_secs: default_http_timeout(),
            http_user_agent: default_user_agent(),
            polymarket_private_key: None,
            polymarket_api_key: None,
            polymarket_api_secret: None,
            polymarket_api_passphrase: None,
            polymarket_funder: None,
            polymarket_signature_type: default_signature_type(),
            polymarket_chain_id: default_chain_id(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Point all three APIs at one base URL (test servers, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            polymarket_gamma_url: base_url.clone(),
            polymarket_clob_url: base_url.clone(),
            polymarket_data_url: base_url,
            ..Self::default()
        }
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("POLYMARKET_GAMMA_URL", &self.polymarket_gamma_url),
            ("POLYMARKET_CLOB_URL", &self.polymarket_clob_url),
            ("POLYMARKET_DATA_URL", &self.polymarket_data_url),
        ] {
            let url = Url::parse(value).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!("{name} must be an http(s) URL"));
            }
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECS must be greater than 0".to_string());
        }

        if let Some(key) = &self.polymarket_private_key {
            if !key.starts_with("0x") {
                return Err("POLYMARKET_PRIVATE_KEY must start with 0x".to_string());
            }
        }

        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Check if trading credentials are present.
    pub fn has_trading_credentials(&self) -> bool {
        self.polymarket_private_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.polymarket_gamma_url, GAMMA_API_URL);
        assert_eq!(config.polymarket_clob_url, CLOB_API_URL);
        assert_eq!(config.polymarket_data_url, DATA_API_URL);
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.polymarket_signature_type, 2);
        assert_eq!(config.polymarket_chain_id, 137);
        assert!(config.http_user_agent.starts_with("polymarket-rust/"));
        assert!(!config.has_trading_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_base_url_overrides_every_endpoint() {
        let config = Config::with_base_url("http://127.0.0.1:1234");
        assert_eq!(config.polymarket_gamma_url, "http://127.0.0.1:1234");
        assert_eq!(config.polymarket_clob_url, "http://127.0.0.1:1234");
        assert_eq!(config.polymarket_data_url, "http://127.0.0.1:1234");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let config = Config {
            polymarket_clob_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            polymarket_data_url: "ftp://data.example.com".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_private_key_prefix() {
        let config = Config {
            polymarket_private_key: Some("abc123".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
