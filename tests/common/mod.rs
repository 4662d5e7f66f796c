//! In-memory price source shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use macd_scanner::sources::{FetchBatch, FetchError, FetchRequest, PriceSource};
use macd_scanner::types::{PriceSeries, Symbol};

#[derive(Debug, Clone, Copy)]
pub enum BatchFailure {
    Offline,
    RateLimited,
}

#[derive(Default)]
pub struct StubSource {
    closes: HashMap<String, Vec<f64>>,
    failures: HashMap<String, String>,
    batch_failure: Option<BatchFailure>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closes(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        self.closes.insert(symbol.to_string(), closes);
        self
    }

    pub fn with_failure(mut self, symbol: &str, detail: &str) -> Self {
        self.failures.insert(symbol.to_string(), detail.to_string());
        self
    }

    pub fn failing(mut self, failure: BatchFailure) -> Self {
        self.batch_failure = Some(failure);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceSource for StubSource {
    async fn fetch(
        &self,
        symbols: &[Symbol],
        _request: &FetchRequest,
    ) -> Result<FetchBatch, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.batch_failure {
            Some(BatchFailure::Offline) => return Err(FetchError::NoConnectivity),
            Some(BatchFailure::RateLimited) => return Err(FetchError::RateLimited),
            None => {}
        }

        let mut batch = FetchBatch::default();
        for symbol in symbols {
            if let Some(detail) = self.failures.get(symbol.as_str()) {
                batch.insert_failure(symbol.clone(), detail.clone());
            } else if let Some(closes) = self.closes.get(symbol.as_str()) {
                batch.insert_series(symbol.clone(), PriceSeries::from_closes(start(), closes));
            }
        }
        Ok(batch)
    }
}

pub fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

/// 50 flat closes.
pub fn flat() -> Vec<f64> {
    vec![100.0; 50]
}

/// Flat history followed by a sharp one-bar rise.
pub fn rise() -> Vec<f64> {
    let mut closes = vec![100.0; 49];
    closes.push(120.0);
    closes
}

/// Flat history followed by a sharp one-bar drop.
pub fn plunge() -> Vec<f64> {
    let mut closes = vec![100.0; 49];
    closes.push(80.0);
    closes
}
