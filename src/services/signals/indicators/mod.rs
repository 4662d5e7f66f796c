//! Technical indicator implementations.

pub mod ema;
pub mod macd;

pub use ema::ema;
pub use macd::{IndicatorError, Macd};

use tracing::{debug, warn};

use crate::types::{FetchStatus, IndicatorSeries, PriceSeries, SymbolMap};

/// Indicator lines and updated statuses for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorOutput {
    /// Present only for symbols whose status is `Ok`.
    pub indicators: SymbolMap<IndicatorSeries>,
    pub statuses: SymbolMap<FetchStatus>,
}

/// Compute MACD lines for every symbol with an `Ok` fetch status.
///
/// Non-OK statuses pass through untouched. A symbol with too little
/// history becomes `InsufficientData`; a numeric failure becomes `Error`
/// for that symbol only.
pub fn compute(
    mut prices: SymbolMap<PriceSeries>,
    statuses: SymbolMap<FetchStatus>,
) -> IndicatorOutput {
    let macd = Macd::default();
    let mut output = IndicatorOutput::default();

    for (symbol, status) in statuses {
        if !status.is_ok() {
            output.statuses.insert(symbol, status);
            continue;
        }

        let Some(series) = prices.remove(&symbol) else {
            debug!("{}: no price series, marking insufficient", symbol);
            output.statuses.insert(symbol, FetchStatus::InsufficientData);
            continue;
        };

        match macd.calculate(&series) {
            Ok(lines) => {
                output.indicators.insert(symbol.clone(), lines);
                output.statuses.insert(symbol, FetchStatus::Ok);
            }
            Err(IndicatorError::InsufficientData { required, available }) => {
                debug!("{}: {} closes available, {} required", symbol, available, required);
                output.statuses.insert(symbol, FetchStatus::InsufficientData);
            }
            Err(e) => {
                warn!("{}: MACD calculation failed: {}", symbol, e);
                output.statuses.insert(symbol, FetchStatus::error(e.to_string()));
            }
        }
    }

    output
}
