//! Service-level tests: polling subscriptions, mutation invalidation,
//! and subscription lifecycle against a mock backend

use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockdesk::api::types::{TradeRequest, TradeType};
use stockdesk::api::MarketApi;
use stockdesk::query::{start_market_data_service, ViewKey};
use stockdesk::trade::validate::ERR_QUANTITY_POSITIVE;
use stockdesk::trade::TradeTicket;

const USER: &str = "demo-user";

fn stock_json() -> serde_json::Value {
    json!({
        "symbol": "AAPL",
        "companyName": "Apple Inc",
        "currentPrice": 150.0,
        "changePercentage": null,
        "lastUpdated": "2024-05-01T14:30:00Z",
        "openPrice": null,
        "highPrice": null,
        "lowPrice": null,
        "volume": null
    })
}

fn holding_json() -> serde_json::Value {
    json!({
        "id": 1,
        "userId": USER,
        "stockSymbol": "AAPL",
        "quantity": 10,
        "averagePurchasePrice": 120.0,
        "currentPrice": 150.0,
        "totalValue": 1500.0,
        "totalCost": 1200.0,
        "gainLoss": 300.0,
        "gainLossPercentage": 25.0,
        "lastUpdated": "2024-05-01T14:30:00Z"
    })
}

fn summary_json() -> serde_json::Value {
    json!({
        "totalValue": 1500.0,
        "totalCost": 1200.0,
        "totalGainLoss": 300.0,
        "totalGainLossPercentage": 25.0,
        "totalPositions": 1
    })
}

fn trade_json() -> serde_json::Value {
    json!({
        "id": 42,
        "userId": USER,
        "stockSymbol": "AAPL",
        "tradeType": "BUY",
        "quantity": 10,
        "price": 150.0,
        "timestamp": "2024-05-01T14:30:00Z",
        "status": "EXECUTED",
        "statusMessage": null,
        "totalValue": 1500.0
    })
}

/// Mount the four read views; `expected` is the number of fetches each
/// must receive over the test's lifetime.
async fn mount_read_views(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/api/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stock_json()])))
        .expect(expected)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/portfolio/user/{}", USER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([holding_json()])))
        .expect(expected)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/portfolio/user/{}/summary", USER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json()))
        .expect(expected)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/trades/user/{}", USER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([trade_json()])))
        .expect(expected)
        .mount(server)
        .await;
}

fn subscribed_keys() -> Vec<ViewKey> {
    vec![
        ViewKey::Stocks,
        ViewKey::Portfolio(USER.to_string()),
        ViewKey::PortfolioSummary(USER.to_string()),
        ViewKey::Trades(USER.to_string()),
    ]
}

#[tokio::test]
async fn subscribe_runs_an_initial_fetch() {
    let server = MockServer::start().await;
    mount_read_views(&server, 1).await;

    let api = MarketApi::new(format!("{}/api", server.uri())).expect("client");
    // long interval so only the initial tick fires
    let service = start_market_data_service(api, Duration::from_secs(600));

    for key in subscribed_keys() {
        service.subscribe(key).await.expect("subscribe");
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    let entry = service
        .snapshot(ViewKey::Stocks)
        .await
        .expect("snapshot")
        .expect("cached entry");
    assert!(!entry.stale);
}

#[tokio::test]
async fn successful_trade_refetches_every_dependent_view() {
    let server = MockServer::start().await;
    // one initial fetch plus one forced refetch per dependent view
    mount_read_views(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/api/stocks/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/trades/buy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trade_json()))
        .expect(1)
        .mount(&server)
        .await;

    let api = MarketApi::new(format!("{}/api", server.uri())).expect("client");
    let service = start_market_data_service(api, Duration::from_secs(600));

    for key in subscribed_keys() {
        service.subscribe(key).await.expect("subscribe");
    }
    // the single-stock view is not a trade dependent and must stay at
    // its initial fetch count
    service
        .subscribe(ViewKey::Stock("AAPL".to_string()))
        .await
        .expect("subscribe");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let trade = service
        .submit_trade(TradeRequest {
            user_id: USER.to_string(),
            stock_symbol: "AAPL".to_string(),
            trade_type: TradeType::Buy,
            quantity: 10,
        })
        .await
        .expect("trade");
    assert_eq!(trade.id, 42);

    // invalidation forces the refetches without waiting for the poll tick
    tokio::time::sleep(Duration::from_millis(400)).await;

    for key in subscribed_keys() {
        let entry = service
            .snapshot(key)
            .await
            .expect("snapshot")
            .expect("cached entry");
        assert!(!entry.stale, "dependent view must be fresh after refetch");
    }

    server.verify().await;
}

#[tokio::test]
async fn failed_validation_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/trades/buy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trade_json()))
        .expect(0)
        .mount(&server)
        .await;

    let api = MarketApi::new(format!("{}/api", server.uri())).expect("client");
    let service = start_market_data_service(api, Duration::from_secs(600));

    let mut ticket = TradeTicket::new(USER, "AAPL", TradeType::Buy, dec!(0));
    let state = ticket.submit(&service).await;
    assert_eq!(state.error(), Some(ERR_QUANTITY_POSITIVE));

    server.verify().await;
}

#[tokio::test]
async fn release_stops_polling_and_evicts_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stock_json()])))
        .mount(&server)
        .await;

    let api = MarketApi::new(format!("{}/api", server.uri())).expect("client");
    // fast interval so polling is observable
    let service = start_market_data_service(api, Duration::from_millis(100));

    service.subscribe(ViewKey::Stocks).await.expect("subscribe");
    tokio::time::sleep(Duration::from_millis(350)).await;

    let polled = server.received_requests().await.expect("recording").len();
    assert!(polled >= 2, "expected repeated polls, saw {}", polled);

    service.release(ViewKey::Stocks).await.expect("release");
    let snapshot = service.snapshot(ViewKey::Stocks).await.expect("snapshot");
    assert!(snapshot.is_none(), "entry must be evicted on last release");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let after = server.received_requests().await.expect("recording").len();
    assert!(
        after <= polled + 1,
        "polling must stop after release ({} -> {})",
        polled,
        after
    );
}

#[tokio::test]
async fn forced_refresh_supersedes_poll_timer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stock_json()])))
        .mount(&server)
        .await;

    let api = MarketApi::new(format!("{}/api", server.uri())).expect("client");
    let service = start_market_data_service(api, Duration::from_secs(600));

    service.subscribe(ViewKey::Stocks).await.expect("subscribe");
    tokio::time::sleep(Duration::from_millis(200)).await;

    let before = service
        .snapshot(ViewKey::Stocks)
        .await
        .expect("snapshot")
        .expect("entry")
        .fetched_at;

    let triggered = service.refresh(ViewKey::Stocks).await.expect("refresh");
    assert!(triggered);
    tokio::time::sleep(Duration::from_millis(300)).await;

    let after = service
        .snapshot(ViewKey::Stocks)
        .await
        .expect("snapshot")
        .expect("entry")
        .fetched_at;
    assert!(after > before, "forced refresh must land a newer fetch");
}
