//! Yahoo client tests against a local mock of the chart endpoint.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Duration, NaiveTime, Utc};
use serde_json::json;
use tokio::net::TcpListener;

use macd_scanner::config::Config;
use macd_scanner::sources::{FetchError, FetchRequest, PriceSource, YahooFinanceClient};
use macd_scanner::types::{FetchStatus, Symbol};

const HISTORY_DAYS: i64 = 40;

/// Daily bars for the last `HISTORY_DAYS` days plus an unfinished bar for today.
fn chart_body(with_volume: bool) -> serde_json::Value {
    let today = Utc::now().date_naive();
    let mut timestamps = Vec::new();
    let mut closes = Vec::new();
    for back in (0..=HISTORY_DAYS).rev() {
        let day = today - Duration::days(back);
        let ts = day.and_time(NaiveTime::MIN).and_utc().timestamp() + 14 * 3600;
        timestamps.push(ts);
        closes.push(json!(100.0 + back as f64));
    }
    // One row without a close.
    closes[5] = json!(null);

    let n = timestamps.len();
    let mut quote = json!({
        "open": vec![100.0; n],
        "high": vec![101.0; n],
        "low": vec![99.0; n],
        "close": closes,
    });
    if with_volume {
        quote["volume"] = json!(vec![1000; n]);
    }

    json!({
        "chart": {
            "result": [{
                "meta": {"symbol": "X", "gmtoffset": 0},
                "timestamp": timestamps,
                "indicators": {"quote": [quote]}
            }],
            "error": null
        }
    })
}

async fn chart(Path(symbol): Path<String>) -> Response {
    match symbol.as_str() {
        "LIMIT" => (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response(),
        "GONE" => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "chart": {
                    "result": null,
                    "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
                }
            })),
        )
            .into_response(),
        "NOVOL" => Json(chart_body(false)).into_response(),
        _ => Json(chart_body(true)).into_response(),
    }
}

/// Start the mock server and return a client pointed at it.
async fn mock_client() -> YahooFinanceClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/v8/finance/chart/:symbol", get(chart));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = Config::default();
    config.fetch.base_url = format!("http://{}", addr);
    config.connectivity.probe_addr = addr.to_string();
    YahooFinanceClient::new(&config).unwrap()
}

fn symbols(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(|s| Symbol::parse(s).unwrap()).collect()
}

#[tokio::test]
async fn test_fetch_batch() {
    let client = mock_client().await;
    let batch = client
        .fetch(&symbols(&["AAPL", "GONE", "NOVOL"]), &FetchRequest::default())
        .await
        .unwrap();

    assert_eq!(batch.statuses.len(), 3);
    assert_eq!(batch.statuses["AAPL"], FetchStatus::Ok);

    let series = &batch.prices["AAPL"];
    // Today's bar and the row without a close are dropped.
    assert_eq!(series.len(), HISTORY_DAYS as usize - 1);
    let today = Utc::now().date_naive();
    assert!(series.bars().iter().all(|b| b.date < today));

    match &batch.statuses["GONE"] {
        FetchStatus::Error(detail) => assert!(detail.contains("Not Found")),
        other => panic!("unexpected status {:?}", other),
    }
    assert_eq!(
        batch.statuses["NOVOL"],
        FetchStatus::error("Missing Volume column")
    );
    assert!(!batch.prices.contains_key("NOVOL"));
}

#[tokio::test]
async fn test_rate_limit_aborts_batch() {
    let client = mock_client().await;
    let result = client
        .fetch(&symbols(&["AAPL", "LIMIT"]), &FetchRequest::default())
        .await;
    assert!(matches!(result, Err(FetchError::RateLimited)));
}

#[tokio::test]
async fn test_offline_aborts_batch() {
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = closed.local_addr().unwrap().to_string();
    drop(closed);

    let mut config = Config::default();
    config.fetch.base_url = format!("http://{}", addr);
    config.connectivity.probe_addr = addr;
    config.connectivity.timeout_ms = 500;
    let client = YahooFinanceClient::new(&config).unwrap();

    let result = client
        .fetch(&symbols(&["AAPL"]), &FetchRequest::default())
        .await;
    assert!(matches!(result, Err(FetchError::NoConnectivity)));
}
