pub mod connectivity;
pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use std::future::Future;
use thiserror::Error;

use crate::config::FetchConfig;
use crate::messages::{render, MessageCode};
use crate::types::{FetchStatus, PriceSeries, Symbol, SymbolMap};

/// History window requested from a price source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub lookback_days: u32,
    pub interval: String,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            lookback_days: 60,
            interval: "1d".to_string(),
        }
    }
}

impl From<&FetchConfig> for FetchRequest {
    fn from(config: &FetchConfig) -> Self {
        Self {
            lookback_days: config.lookback_days,
            interval: config.interval.clone(),
        }
    }
}

/// Downloaded history for one batch of symbols.
///
/// Every requested symbol has a status; only `Ok` symbols have a series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchBatch {
    pub prices: SymbolMap<PriceSeries>,
    pub statuses: SymbolMap<FetchStatus>,
}

impl FetchBatch {
    pub fn insert_series(&mut self, symbol: Symbol, series: PriceSeries) {
        self.statuses.insert(symbol.clone(), FetchStatus::Ok);
        self.prices.insert(symbol, series);
    }

    pub fn insert_failure(&mut self, symbol: Symbol, detail: impl Into<String>) {
        self.prices.remove(&symbol);
        self.statuses.insert(symbol, FetchStatus::error(detail));
    }
}

/// Failures that abort a whole batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No network connectivity")]
    NoConnectivity,

    #[error("Rate limited by price provider")]
    RateLimited,

    #[error("Price provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl FetchError {
    /// User-facing diagnostic for this failure.
    pub fn message(&self) -> String {
        match self {
            FetchError::NoConnectivity => render(MessageCode::NoInternet, &[]),
            FetchError::RateLimited => render(MessageCode::ApiLimit, &[]),
            FetchError::Provider(detail) => render(MessageCode::ApiError, &[("error", detail)]),
            FetchError::Reqwest(e) => render(MessageCode::ApiError, &[("error", &e.to_string())]),
        }
    }
}

/// A provider of daily OHLCV history.
pub trait PriceSource: Send + Sync {
    fn fetch(
        &self,
        symbols: &[Symbol],
        request: &FetchRequest,
    ) -> impl Future<Output = Result<FetchBatch, FetchError>> + Send;
}
