//! Command-line front end for the Polymarket REST client.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use polymarket_sdk::activity::{DEFAULT_LEADERBOARD_LIMIT, DEFAULT_TRADES_LIMIT};
use polymarket_sdk::config::Config;
use polymarket_sdk::format::{format_price, parse_price};
use polymarket_sdk::market::{Outcome, PolymarketClient, DEFAULT_MARKET_LIMIT};
use polymarket_sdk::metrics;

/// Query Polymarket markets, prices, order books and activity.
#[derive(Parser, Debug)]
#[command(name = "polymarket")]
#[command(about = "Query Polymarket markets, prices, order books and activity")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a market by ID.
    Market {
        /// Market ID.
        market_id: String,
    },

    /// Show an event and its markets by slug.
    Event {
        /// Event slug.
        slug: String,
    },

    /// Show YES/NO prices for a market.
    Price {
        /// Market ID.
        market_id: String,
    },

    /// Show the top-of-book spread for one outcome.
    Spread {
        /// Market ID.
        market_id: String,
        /// Outcome (yes/no).
        #[arg(short, long, default_value = "yes")]
        outcome: String,
    },

    /// Show the order book for a CLOB token.
    Book {
        /// CLOB token ID.
        token_id: String,
    },

    /// Resolve a market outcome to its CLOB token ID.
    Token {
        /// Market ID.
        market_id: String,
        /// Outcome (yes/no).
        #[arg(short, long, default_value = "yes")]
        outcome: String,
    },

    /// Show which market and outcome a CLOB token belongs to.
    TokenInfo {
        /// CLOB token ID.
        token_id: String,
    },

    /// Search active markets by question text.
    Search {
        /// Text to look for in market questions.
        query: String,
        /// Number of markets to fetch.
        #[arg(short, long, default_value_t = DEFAULT_MARKET_LIMIT)]
        limit: u32,
    },

    /// Show the highest-volume active markets.
    Trending {
        /// Number of markets to fetch.
        #[arg(short, long, default_value_t = DEFAULT_MARKET_LIMIT)]
        limit: u32,
    },

    /// Show recent trades on a market's YES token.
    Trades {
        /// Market ID.
        market_id: String,
        /// Number of trades to fetch.
        #[arg(short, long, default_value_t = DEFAULT_TRADES_LIMIT)]
        limit: u32,
    },

    /// Show positions held by a wallet.
    Positions {
        /// Wallet address.
        address: String,
    },

    /// Show the trader leaderboard.
    Leaderboard {
        /// Number of traders to fetch.
        #[arg(short, long, default_value_t = DEFAULT_LEADERBOARD_LIMIT)]
        limit: u32,
    },

    /// Format a decimal probability as cents.
    FormatPrice {
        /// Probability, e.g. 0.35.
        price: Decimal,
    },

    /// Parse a cents or decimal price into a probability.
    ParsePrice {
        /// Price, e.g. "35c", "35¢", "0.35".
        input: String,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("polymarket_sdk=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    metrics::init_metrics();

    match args.command {
        Command::FormatPrice { price } => {
            println!("{}", format_price(price));
            Ok(())
        }
        Command::ParsePrice { input } => {
            println!("{}", parse_price(&input)?);
            Ok(())
        }
        Command::CheckConfig => cmd_check_config(),
        Command::Market { market_id } => print_found(connect()?.get_market(&market_id).await?),
        Command::Event { slug } => print_found(connect()?.get_event(&slug).await?),
        Command::Price { market_id } => cmd_price(&connect()?, &market_id).await,
        Command::Spread { market_id, outcome } => {
            let outcome = Outcome::from(outcome.as_str());
            print_found(connect()?.find_spread(&market_id, outcome).await?)
        }
        Command::Book { token_id } => print_json(&connect()?.get_orderbook(&token_id).await?),
        Command::Token { market_id, outcome } => {
            let outcome = Outcome::from(outcome.as_str());
            match connect()?.get_token_id(&market_id, outcome).await? {
                Some(token_id) => println!("{}", token_id),
                None => println!("Token not found"),
            }
            Ok(())
        }
        Command::TokenInfo { token_id } => {
            print_found(connect()?.get_market_by_token(&token_id).await?)
        }
        Command::Search { query, limit } => {
            print_json(&connect()?.search_markets(&query, limit).await?)
        }
        Command::Trending { limit } => print_json(&connect()?.get_trending(limit).await?),
        Command::Trades { market_id, limit } => {
            print_json(&connect()?.get_trades(&market_id, limit).await?)
        }
        Command::Positions { address } => print_json(&connect()?.get_positions(&address).await?),
        Command::Leaderboard { limit } => print_json(&connect()?.get_leaderboard(limit).await?),
    }
}

/// Build a client from validated environment configuration.
fn connect() -> anyhow::Result<PolymarketClient> {
    let config = Config::load()?;
    config.validate().map_err(anyhow::Error::msg)?;
    let client = PolymarketClient::new(&config)?;
    debug!(gamma = %client.gamma_url(), clob = %client.clob_url(), "Client ready");
    Ok(client)
}

/// Print YES/NO prices in cents.
async fn cmd_price(client: &PolymarketClient, market_id: &str) -> anyhow::Result<()> {
    let Some(prices) = client.find_price(market_id).await? else {
        println!("Market not found");
        return Ok(());
    };
    println!("YES: {}", format_price(prices.yes));
    println!("NO:  {}", format_price(prices.no));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_found<T: Serialize>(value: Option<T>) -> anyhow::Result<()> {
    match value {
        Some(value) => print_json(&value),
        None => {
            println!("Not found");
            Ok(())
        }
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("POLYMARKET - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    #[cfg(feature = "clob")]
    if let Some(key) = &config.polymarket_private_key {
        print!("Checking private key... ");
        match polymarket_sdk::signing::address_from_private_key(key) {
            Ok(addr) => {
                println!("OK");
                println!("  Wallet address: {}", addr);
            }
            Err(e) => {
                println!("FAILED");
                println!("  Error: {}", e);
                return Err(anyhow::anyhow!("Private key invalid"));
            }
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Gamma API: {}", config.polymarket_gamma_url);
    println!("  CLOB API:  {}", config.polymarket_clob_url);
    println!("  Data API:  {}", config.polymarket_data_url);
    println!("  Timeout:   {}s", config.http_timeout_secs);
    println!(
        "  Trading:   {}",
        if config.has_trading_credentials() {
            "Credentials present"
        } else {
            "No credentials (read-only)"
        }
    );
    if config.has_trading_credentials() {
        println!(
            "  Signature Type: {} ({})",
            config.polymarket_signature_type,
            match config.polymarket_signature_type {
                0 => "EOA - Standard wallet",
                1 => "Magic.link - Proxy wallet",
                2 => "Gnosis Safe - Polymarket proxy",
                _ => "Unknown",
            }
        );
        if let Some(funder) = &config.polymarket_funder {
            println!("  Funder Address: {}", funder);
        }
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
