//! Yahoo Finance API client for historical stock data.
//!
//! Downloads daily OHLCV bars from the unofficial chart endpoint. The
//! current, possibly incomplete, trading day is never returned.

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveTime, Utc};
use futures_util::future::join_all;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::connectivity::is_online;
use super::{FetchBatch, FetchError, FetchRequest, PriceSource};
use crate::config::{Config, ConnectivityConfig};
use crate::types::{PriceBar, PriceSeries, Symbol};

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    #[serde(default)]
    meta: YahooMeta,
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
    connectivity: ConnectivityConfig,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: config.fetch.base_url.clone(),
            connectivity: config.connectivity.clone(),
        })
    }

    fn chart_url(&self, symbol: &Symbol, request: &FetchRequest, today: NaiveDate) -> String {
        let start = today - ChronoDuration::days(i64::from(request.lookback_days));
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval={}&includePrePost=false",
            self.base_url,
            symbol,
            midnight_utc(start),
            midnight_utc(today),
            request.interval
        )
    }

    /// Fetch one symbol.
    ///
    /// The outer error aborts the batch; the inner one only fails this symbol.
    async fn fetch_symbol(
        &self,
        symbol: &Symbol,
        request: &FetchRequest,
        today: NaiveDate,
    ) -> Result<Result<PriceSeries, String>, FetchError> {
        let url = self.chart_url(symbol, request, today);
        debug!("Fetching Yahoo Finance data: {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return Ok(Err(format!("Request failed: {}", e))),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        let data: YahooChartResponse = match response.json().await {
            Ok(d) => d,
            Err(_) if !status.is_success() => return Ok(Err(format!("API error: {}", status))),
            Err(e) => return Ok(Err(format!("Parse error: {}", e))),
        };

        Ok(series_from_chart(data, today))
    }
}

impl PriceSource for YahooFinanceClient {
    async fn fetch(
        &self,
        symbols: &[Symbol],
        request: &FetchRequest,
    ) -> Result<FetchBatch, FetchError> {
        if !is_online(&self.connectivity.probe_addr, self.connectivity.timeout()).await {
            return Err(FetchError::NoConnectivity);
        }

        let today = Utc::now().date_naive();
        let outcomes = join_all(
            symbols
                .iter()
                .map(|symbol| self.fetch_symbol(symbol, request, today)),
        )
        .await;

        let mut batch = FetchBatch::default();
        for (symbol, outcome) in symbols.iter().zip(outcomes) {
            match outcome? {
                Ok(series) => {
                    debug!("{}: {} bars", symbol, series.len());
                    batch.insert_series(symbol.clone(), series);
                }
                Err(detail) => {
                    warn!("{}: fetch failed: {}", symbol, detail);
                    batch.insert_failure(symbol.clone(), detail);
                }
            }
        }

        info!(
            "Fetched {} of {} symbols from Yahoo Finance",
            batch.prices.len(),
            symbols.len()
        );
        Ok(batch)
    }
}

fn midnight_utc(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Turn a chart response into a price series ending before `today`.
fn series_from_chart(data: YahooChartResponse, today: NaiveDate) -> Result<PriceSeries, String> {
    if let Some(error) = data.chart.error {
        return Err(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        ));
    }

    let result = data
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| "No results in response".to_string())?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| "No quote data in response".to_string())?;

    let column = |values: Option<Vec<Option<f64>>>, name: &str| {
        values.ok_or_else(|| format!("Missing {} column", name))
    };
    let opens = column(quote.open, "Open")?;
    let highs = column(quote.high, "High")?;
    let lows = column(quote.low, "Low")?;
    let closes = column(quote.close, "Close")?;
    let volumes = column(quote.volume, "Volume")?;

    let value = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten().unwrap_or(f64::NAN);

    let mut bars: Vec<PriceBar> = Vec::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        // Rows without a close are dropped.
        let Some(close) = closes.get(i).copied().flatten() else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(timestamp + result.meta.gmtoffset, 0)
            .map(|t| t.date_naive())
        else {
            continue;
        };

        let bar = PriceBar {
            date,
            open: value(&opens, i),
            high: value(&highs, i),
            low: value(&lows, i),
            close,
            volume: value(&volumes, i),
        };

        // Yahoo can repeat the latest session; keep the newer row.
        match bars.last_mut() {
            Some(last) if last.date == date => *last = bar,
            _ => bars.push(bar),
        }
    }

    if bars.is_empty() {
        return Err("No closing prices in response".to_string());
    }

    let series = PriceSeries::new(bars).map_err(|e| e.to_string())?;
    Ok(series.before(today))
}
