//! Integration tests for the Polymarket REST client.
//!
//! Every test runs against a local mockito server standing in for the gamma,
//! CLOB and data APIs.

use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use polymarket_sdk::config::Config;
use polymarket_sdk::format::{format_price, parse_price};
use polymarket_sdk::market::{MarketSummary, Outcome, PolymarketClient, Prices};
use polymarket_sdk::orderbook::Spread;
use polymarket_sdk::trading::{place_order, MockTradingBackend, Side};
use polymarket_sdk::SdkError;
#[cfg(not(feature = "clob"))]
use polymarket_sdk::{
    trading::{create_client, Credentials},
    TradingError,
};

const MARKET_1230810: &str = r#"[{
    "id": "1230810",
    "question": "Will it rain tomorrow?",
    "slug": "will-it-rain-tomorrow",
    "endDate": "2026-12-31T12:00:00Z",
    "active": true,
    "closed": false,
    "volume": "12345.67",
    "outcomePrices": "[\"0.65\",\"0.35\"]",
    "clobTokenIds": "[\"111\",\"222\"]"
}]"#;

fn test_client(server: &ServerGuard) -> PolymarketClient {
    PolymarketClient::new(&Config::with_base_url(server.url())).unwrap()
}

fn mock_market(server: &mut ServerGuard, market_id: &str, body: &str) -> Mock {
    server
        .mock("GET", "/markets")
        .match_query(Matcher::UrlEncoded("id".into(), market_id.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
}

#[tokio::test]
async fn price_and_token_for_known_market() {
    let mut server = Server::new_async().await;
    let mock = mock_market(&mut server, "1230810", MARKET_1230810)
        .expect(2)
        .create_async()
        .await;
    let client = test_client(&server);

    let prices = client.get_price("1230810").await.unwrap();
    assert_eq!(prices, Prices { yes: dec!(0.65), no: dec!(0.35) });

    let token = client.get_token_id("1230810", "no").await.unwrap();
    assert_eq!(token.as_deref(), Some("222"));

    mock.assert_async().await;
}

#[tokio::test]
async fn unknown_market_is_none_and_zero_price() {
    let mut server = Server::new_async().await;
    let _mock = mock_market(&mut server, "404", "[]")
        .create_async()
        .await;
    let client = test_client(&server);

    assert_eq!(client.get_market("404").await.unwrap(), None);
    assert_eq!(client.find_price("404").await.unwrap(), None);
    assert_eq!(client.get_price("404").await.unwrap(), Prices::default());
    assert_eq!(client.get_token_id("404", Outcome::Yes).await.unwrap(), None);
    assert_eq!(client.get_spread("404", "yes").await.unwrap(), Spread::NO_LIQUIDITY);
    assert!(client.get_trades("404", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn string_and_array_encodings_are_equivalent() {
    let mut server = Server::new_async().await;
    let _string = mock_market(&mut server, "1", MARKET_1230810)
        .create_async()
        .await;
    let _array = mock_market(
        &mut server,
        "2",
        r#"[{"id": 1230810, "outcomePrices": ["0.65", "0.35"], "clobTokenIds": ["111", "222"]}]"#,
    )
    .create_async()
    .await;
    let client = test_client(&server);

    let encoded = client.get_market("1").await.unwrap().unwrap();
    let native = client.get_market("2").await.unwrap().unwrap();

    assert_eq!(encoded.id, native.id);
    assert_eq!(encoded.outcome_prices, native.outcome_prices);
    assert_eq!(encoded.clob_token_ids, native.clob_token_ids);
    assert_eq!(encoded.prices().unwrap(), native.prices().unwrap());
}

#[tokio::test]
async fn outcome_label_is_case_insensitive() {
    let mut server = Server::new_async().await;
    let _mock = mock_market(&mut server, "1230810", MARKET_1230810)
        .create_async()
        .await;
    let client = test_client(&server);

    for label in ["yes", "YES", "Yes"] {
        assert_eq!(
            client.get_token_id("1230810", label).await.unwrap().as_deref(),
            Some("111"),
            "label {label:?}"
        );
    }
    for label in ["no", "NO", "No"] {
        assert_eq!(
            client.get_token_id("1230810", label).await.unwrap().as_deref(),
            Some("222"),
            "label {label:?}"
        );
    }
}

#[tokio::test]
async fn spread_uses_top_of_book() {
    let mut server = Server::new_async().await;
    let _market = mock_market(&mut server, "1230810", MARKET_1230810)
        .create_async()
        .await;
    let book = server
        .mock("GET", "/book")
        .match_query(Matcher::UrlEncoded("token_id".into(), "111".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "market": "0xcondition",
                "asset_id": "111",
                "bids": [{"price": "0.64", "size": "100"}, {"price": "0.63", "size": "50"}],
                "asks": [{"price": "0.66", "size": "80"}]
            }"#,
        )
        .create_async()
        .await;
    let client = test_client(&server);

    let spread = client.get_spread("1230810", Outcome::Yes).await.unwrap();
    assert_eq!(spread, Spread { bid: dec!(0.64), ask: dec!(0.66), spread: dec!(0.02) });

    book.assert_async().await;
}

#[tokio::test]
async fn empty_book_has_degenerate_spread() {
    let mut server = Server::new_async().await;
    let _market = mock_market(&mut server, "1230810", MARKET_1230810)
        .create_async()
        .await;
    let _book = server
        .mock("GET", "/book")
        .match_query(Matcher::UrlEncoded("token_id".into(), "222".into()))
        .with_status(200)
        .with_body(r#"{"bids": [], "asks": []}"#)
        .create_async()
        .await;
    let client = test_client(&server);

    let book = client.get_orderbook("222").await.unwrap();
    assert!(book.is_empty());

    let spread = client.get_spread("1230810", Outcome::No).await.unwrap();
    assert_eq!(spread, Spread { bid: dec!(0), ask: dec!(1), spread: dec!(1) });
}

#[tokio::test]
async fn book_with_missing_sides_is_empty() {
    let mut server = Server::new_async().await;
    let _book = server
        .mock("GET", "/book")
        .match_query(Matcher::UrlEncoded("token_id".into(), "999".into()))
        .with_status(200)
        .with_body(r#"{"bids": null}"#)
        .create_async()
        .await;
    let client = test_client(&server);

    let book = client.get_orderbook("999").await.unwrap();
    assert!(book.bids.is_empty());
    assert!(book.asks.is_empty());
}

#[tokio::test]
async fn null_text_fields_still_decode() {
    let body = r#"[{
        "id": "1",
        "question": null,
        "slug": null,
        "endDate": null,
        "outcomePrices": "[\"0.65\",\"0.35\"]",
        "clobTokenIds": "[\"111\",\"222\"]"
    }]"#;
    let mut server = Server::new_async().await;
    let _market = mock_market(&mut server, "1", body).create_async().await;
    let _by_token = server
        .mock("GET", "/markets")
        .match_query(Matcher::UrlEncoded("clob_token_ids".into(), "111".into()))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;
    let _event = server
        .mock("GET", "/events")
        .match_query(Matcher::UrlEncoded("slug".into(), "empty".into()))
        .with_status(200)
        .with_body(r#"[{"id": "5", "slug": null, "title": null, "markets": null}]"#)
        .create_async()
        .await;
    let client = test_client(&server);

    let prices = client.get_price("1").await.unwrap();
    assert_eq!(prices, Prices { yes: dec!(0.65), no: dec!(0.35) });
    assert_eq!(client.get_token_id("1", Outcome::No).await.unwrap().as_deref(), Some("222"));

    let summary = client.get_market_by_token("111").await.unwrap().unwrap();
    assert_eq!(summary.question, "Unknown");
    assert_eq!(summary.slug, "");
    assert_eq!(summary.outcome, Outcome::Yes);

    let event = client.get_event("empty").await.unwrap().unwrap();
    assert_eq!(event.id, "5");
    assert!(event.markets.is_empty());
}

#[tokio::test]
async fn reverse_lookup_is_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/markets")
        .match_query(Matcher::UrlEncoded("clob_token_ids".into(), "222".into()))
        .with_status(200)
        .with_body(MARKET_1230810)
        .expect(1)
        .create_async()
        .await;
    let client = test_client(&server);

    let first = client.get_market_by_token("222").await.unwrap().unwrap();
    let second = client.get_market_by_token("222").await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        MarketSummary {
            question: "Will it rain tomorrow?".to_string(),
            outcome: Outcome::No,
            slug: "will-it-rain-tomorrow".to_string(),
            market_id: "1230810".to_string(),
            end_date: "2026-12-31T12:00:00Z".to_string(),
        }
    );
    assert_eq!(client.token_cache().len(), 1);

    mock.assert_async().await;
}

#[tokio::test]
async fn clearing_the_cache_forces_a_new_lookup() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/markets")
        .match_query(Matcher::UrlEncoded("clob_token_ids".into(), "111".into()))
        .with_status(200)
        .with_body(MARKET_1230810)
        .expect(3)
        .create_async()
        .await;
    let client = test_client(&server);

    let summary = client.get_market_by_token("111").await.unwrap().unwrap();
    assert_eq!(summary.outcome, Outcome::Yes);

    client.token_cache().clear();
    client.get_market_by_token("111").await.unwrap();
    client.refresh_market_by_token("111").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn unrecognized_token_is_labelled_no() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/markets")
        .match_query(Matcher::UrlEncoded("clob_token_ids".into(), "333".into()))
        .with_status(200)
        .with_body(MARKET_1230810)
        .create_async()
        .await;
    let client = test_client(&server);

    let summary = client.get_market_by_token("333").await.unwrap().unwrap();
    assert_eq!(summary.outcome, Outcome::No);
}

#[tokio::test]
async fn unknown_token_is_not_cached() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/markets")
        .match_query(Matcher::UrlEncoded("clob_token_ids".into(), "000".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let client = test_client(&server);

    assert_eq!(client.get_market_by_token("000").await.unwrap(), None);
    assert!(client.token_cache().is_empty());
}

#[tokio::test]
async fn search_filters_questions_locally() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/markets")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("_limit".into(), "5".into()),
            Matcher::UrlEncoded("active".into(), "true".into()),
            Matcher::UrlEncoded("closed".into(), "false".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"[
                {"id": "1", "question": "Will Bitcoin hit $100k?"},
                {"id": "2", "question": "Who wins the election?"},
                {"id": "3", "question": "bitcoin above 90k on Friday?"}
            ]"#,
        )
        .create_async()
        .await;
    let client = test_client(&server);

    let found = client.search_markets("BITCOIN", 5).await.unwrap();
    let ids: Vec<&str> = found.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    mock.assert_async().await;
}

#[tokio::test]
async fn trending_orders_by_volume() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/markets")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("_limit".into(), "10".into()),
            Matcher::UrlEncoded("order".into(), "volume".into()),
            Matcher::UrlEncoded("ascending".into(), "false".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"id": "9", "volume": 5000}, {"id": "8", "volume": "100.5"}]"#)
        .create_async()
        .await;
    let client = test_client(&server);

    let markets = client.get_trending(10).await.unwrap();
    assert_eq!(markets.len(), 2);
    assert_eq!(markets[0].volume(), Some(dec!(5000)));
    assert_eq!(markets[1].volume(), Some(dec!(100.5)));

    mock.assert_async().await;
}

#[tokio::test]
async fn event_includes_normalized_markets() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/events")
        .match_query(Matcher::UrlEncoded("slug".into(), "weather".into()))
        .with_status(200)
        .with_body(
            r#"[{
                "id": "77",
                "slug": "weather",
                "title": "Weather",
                "markets": [{"id": "1230810", "clobTokenIds": "[\"111\",\"222\"]"}]
            }]"#,
        )
        .create_async()
        .await;
    let client = test_client(&server);

    let event = client.get_event("weather").await.unwrap().unwrap();
    assert_eq!(event.title.as_deref(), Some("Weather"));
    assert_eq!(event.markets[0].token_id(Outcome::No), Some("222"));
}

#[tokio::test]
async fn trades_query_the_yes_token() {
    let mut server = Server::new_async().await;
    let _market = mock_market(&mut server, "1230810", MARKET_1230810)
        .create_async()
        .await;
    let trades = server
        .mock("GET", "/trades")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("asset_id".into(), "111".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"price": "0.65", "size": 10}, {"price": "0.64", "size": 3}]"#)
        .create_async()
        .await;
    let client = test_client(&server);

    let records = client.get_trades("1230810", 2).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["price"], "0.65");

    trades.assert_async().await;
}

#[tokio::test]
async fn positions_and_leaderboard_pass_records_through() {
    let mut server = Server::new_async().await;
    let positions = server
        .mock("GET", "/positions")
        .match_query(Matcher::UrlEncoded("user".into(), "0xabc".into()))
        .with_status(200)
        .with_body(r#"[{"asset": "111", "size": 42, "curPrice": 0.65}]"#)
        .create_async()
        .await;
    let leaderboard = server
        .mock("GET", "/leaderboard")
        .match_query(Matcher::UrlEncoded("limit".into(), "20".into()))
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;
    let client = test_client(&server);

    let records = client.get_positions("0xabc").await.unwrap();
    assert_eq!(records[0]["size"], 42);
    assert_eq!(records[0]["curPrice"], 0.65);

    assert!(client.get_leaderboard(20).await.unwrap().is_empty());

    positions.assert_async().await;
    leaderboard.assert_async().await;
}

#[tokio::test]
async fn http_errors_propagate() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/markets")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let client = test_client(&server);

    let result = client.get_price("1230810").await;
    assert!(matches!(result, Err(SdkError::Http(_))));
}

#[tokio::test]
async fn malformed_json_propagates() {
    let mut server = Server::new_async().await;
    let _mock = mock_market(&mut server, "1230810", "not json")
        .create_async()
        .await;
    let client = test_client(&server);

    let result = client.get_market("1230810").await;
    assert!(matches!(result, Err(SdkError::Json(_))));
}

#[test]
fn accepted_price_literals() {
    for input in ["35c", "35¢", "35 cents", "0.35", ".35"] {
        assert_eq!(parse_price(input).unwrap(), dec!(0.35), "input {input:?}");
    }
    assert_eq!(parse_price(&format_price(dec!(0.345))).unwrap(), dec!(0.35));
}

#[tokio::test]
async fn place_order_through_mock_backend() {
    let backend = MockTradingBackend::new();
    let ack = place_order(&backend, "111", Side::Buy, dec!(0.65), dec!(10))
        .await
        .unwrap();
    assert!(ack.success);
    assert_eq!(backend.open_order_count(), 1);
}

#[cfg(not(feature = "clob"))]
#[test]
fn create_client_requires_clob_feature() {
    let credentials = Credentials::new("0xkey", "0xfunder");
    assert!(matches!(
        create_client(&credentials),
        Err(TradingError::MissingDependency(_))
    ));
}
