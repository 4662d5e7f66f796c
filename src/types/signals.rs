use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade signal derived from the latest MACD/Signal crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Buy,
    Sell,
    #[default]
    Neutral,
}

impl Classification {
    pub const ALL: [Classification; 3] = [Self::Buy, Self::Sell, Self::Neutral];

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            "NEUTRAL" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category used to project a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalFilter {
    #[default]
    All,
    Only(Classification),
}

impl SignalFilter {
    /// Parse from string; `all` (any case) selects everything.
    pub fn from_str(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Classification::from_str(s).map(Self::Only)
    }

    pub fn matches(&self, signal: Classification) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == signal,
        }
    }
}

/// One aligned MACD observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD, Signal and Histogram lines for one symbol, indexed by bar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn new(points: Vec<IndicatorPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&IndicatorPoint> {
        self.points.last()
    }

    /// The last two points as `(previous, current)`.
    pub fn last_two(&self) -> Option<(&IndicatorPoint, &IndicatorPoint)> {
        match self.points.as_slice() {
            [.., prev, current] => Some((prev, current)),
            _ => None,
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&IndicatorPoint> {
        self.points.iter().find(|p| p.date == date)
    }
}
