//! MACD crossover classification.

use crate::types::{Classification, FetchStatus, IndicatorPoint, IndicatorSeries, SymbolMap};

/// Classify one symbol from its indicator lines and status.
///
/// Only the last two points are inspected:
/// - BUY: MACD crosses above Signal with a positive histogram.
/// - SELL: MACD crosses below Signal with a negative histogram.
/// - NEUTRAL otherwise, and whenever the status is not `Ok`.
pub fn classify_series(series: Option<&IndicatorSeries>, status: &FetchStatus) -> Classification {
    if !status.is_ok() {
        return Classification::Neutral;
    }

    let Some((prev, current)) = series.and_then(IndicatorSeries::last_two) else {
        return Classification::Neutral;
    };

    if !is_finite(prev) || !is_finite(current) {
        return Classification::Neutral;
    }

    if current.macd > current.signal && prev.macd <= prev.signal && current.histogram > 0.0 {
        Classification::Buy
    } else if current.macd < current.signal && prev.macd >= prev.signal && current.histogram < 0.0 {
        Classification::Sell
    } else {
        Classification::Neutral
    }
}

fn is_finite(point: &IndicatorPoint) -> bool {
    point.macd.is_finite() && point.signal.is_finite() && point.histogram.is_finite()
}

/// Classify every symbol that has a status.
pub fn classify(
    indicators: &SymbolMap<IndicatorSeries>,
    statuses: &SymbolMap<FetchStatus>,
) -> SymbolMap<Classification> {
    statuses
        .iter()
        .map(|(symbol, status)| {
            (
                symbol.clone(),
                classify_series(indicators.get(symbol), status),
            )
        })
        .collect()
}
