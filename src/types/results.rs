use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Classification, FetchStatus, Symbol};

/// Final per-symbol record of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub symbol: Symbol,
    pub status: FetchStatus,
    pub signal: Classification,
}

/// Result set of one analysis run, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResults {
    records: Vec<ResultRecord>,
}

impl AnalysisResults {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }

    pub fn get(&self, symbol: &str) -> Option<&ResultRecord> {
        self.records.iter().find(|r| r.symbol.as_str() == symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records carrying the given signal.
    pub fn count(&self, signal: Classification) -> usize {
        self.records.iter().filter(|r| r.signal == signal).count()
    }
}

impl fmt::Display for AnalysisResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}: Status={}, Signal={}",
                record.symbol, record.status, record.signal
            )?;
        }
        Ok(())
    }
}
