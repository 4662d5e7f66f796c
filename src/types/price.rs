use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Bar where every price equals `close` and volume is zero.
    pub fn flat(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }
}

/// Errors raised when building a price series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("bar dates must be strictly increasing ({previous} followed by {next})")]
    NotIncreasing { previous: NaiveDate, next: NaiveDate },
}

/// Daily bars for one symbol, strictly increasing by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NotIncreasing {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { bars })
    }

    /// Build a series of flat bars on consecutive days starting at `start`.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, close)| PriceBar::flat(start + chrono::Duration::days(i as i64), *close))
            .collect();
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars whose close is a finite number.
    pub fn valid_bars(&self) -> impl Iterator<Item = &PriceBar> {
        self.bars.iter().filter(|b| b.close.is_finite())
    }

    /// Drop every bar dated on or after `day`.
    pub fn before(self, day: NaiveDate) -> Self {
        Self {
            bars: self.bars.into_iter().filter(|b| b.date < day).collect(),
        }
    }
}
