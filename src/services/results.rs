//! Result aggregation and filtering.

use crate::types::{
    AnalysisResults, Classification, FetchStatus, ResultRecord, SignalFilter, SymbolMap,
};

/// Join statuses and signals into a fresh result set.
///
/// One record per status entry, ordered by symbol. A symbol without a
/// classification is reported as `NEUTRAL`.
pub fn build(
    statuses: SymbolMap<FetchStatus>,
    signals: &SymbolMap<Classification>,
) -> AnalysisResults {
    let records = statuses
        .into_iter()
        .map(|(symbol, status)| {
            let signal = signals.get(&symbol).copied().unwrap_or_default();
            ResultRecord {
                symbol,
                status,
                signal,
            }
        })
        .collect();

    AnalysisResults::new(records)
}

/// Keep only the records matching `filter`.
pub fn filter(results: &AnalysisResults, filter: SignalFilter) -> AnalysisResults {
    AnalysisResults::new(
        results
            .records()
            .iter()
            .filter(|r| filter.matches(r.signal))
            .cloned()
            .collect(),
    )
}
