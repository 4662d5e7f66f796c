//! One end-to-end analysis run.
//!
//! validate -> fetch -> compute -> classify -> aggregate. Each call builds
//! its own intermediate state; nothing is shared between runs.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::signals::{classifier, indicators};
use super::{results, validator};
use crate::sources::{FetchError, FetchRequest, PriceSource};
use crate::types::{AnalysisResults, Classification, FetchStatus, Symbol};

/// Output of a successful run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub run_id: Uuid,
    pub symbols: Vec<Symbol>,
    pub messages: Vec<String>,
    pub results: AnalysisResults,
}

/// Reasons a run stops before producing results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("symbol list rejected")]
    Rejected(validator::ValidationReport),

    #[error("price download failed: {error}")]
    Fetch {
        error: FetchError,
        messages: Vec<String>,
    },
}

impl AnalysisError {
    /// Every diagnostic collected up to the failure.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AnalysisError::Rejected(report) => report.messages.clone(),
            AnalysisError::Fetch { error, messages } => {
                let mut all = messages.clone();
                all.push(error.message());
                all
            }
        }
    }
}

/// Options for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub truncate: bool,
    pub cap: usize,
    pub request: FetchRequest,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            truncate: false,
            cap: validator::DEFAULT_SYMBOL_CAP,
            request: FetchRequest::default(),
        }
    }
}

/// Run the full pipeline over raw symbol strings.
pub async fn run<S, T>(
    source: &S,
    raw_symbols: &[T],
    options: &RunOptions,
) -> Result<AnalysisRun, AnalysisError>
where
    S: PriceSource,
    T: AsRef<str>,
{
    let run_id = Uuid::new_v4();
    let report = validator::validate_input(raw_symbols, options.truncate, options.cap);
    if !report.can_continue() {
        warn!(%run_id, "Symbol list rejected: {:?}", report.messages);
        return Err(AnalysisError::Rejected(report));
    }

    info!(%run_id, symbols = report.symbols.len(), "Starting analysis run");

    let batch = match source.fetch(&report.symbols, &options.request).await {
        Ok(batch) => batch,
        Err(error) => {
            warn!(%run_id, "Price download failed: {}", error);
            return Err(AnalysisError::Fetch {
                error,
                messages: report.messages,
            });
        }
    };

    let mut statuses = batch.statuses;
    // Symbols the source did not report on are treated as failed downloads.
    for symbol in &report.symbols {
        statuses
            .entry(symbol.clone())
            .or_insert_with(|| FetchStatus::error("no data returned"));
    }

    let computed = indicators::compute(batch.prices, statuses);
    let signals = classifier::classify(&computed.indicators, &computed.statuses);
    let results = results::build(computed.statuses, &signals);

    info!(
        %run_id,
        buy = results.count(Classification::Buy),
        sell = results.count(Classification::Sell),
        total = results.len(),
        "Analysis run complete"
    );
    debug!(%run_id, "Results:\n{}", results);

    Ok(AnalysisRun {
        run_id,
        symbols: report.symbols,
        messages: report.messages,
        results,
    })
}
