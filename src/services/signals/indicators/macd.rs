//! MACD (Moving Average Convergence Divergence) indicator.

use thiserror::Error;

use super::ema::ema;
use crate::types::{IndicatorPoint, IndicatorSeries, PriceSeries};

/// Errors raised while computing MACD lines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("need at least {required} closing prices, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("non-finite {field} value on {date}")]
    NonFinite { field: &'static str, date: chrono::NaiveDate },
}

/// MACD indicator.
///
/// Shows the relationship between two EMAs of the close:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    /// Minimum number of finite closes required.
    pub fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period
    }

    /// Compute the three MACD lines over the bars with a finite close.
    ///
    /// The output has one point per such bar, carrying the bar's date.
    pub fn calculate(&self, series: &PriceSeries) -> Result<IndicatorSeries, IndicatorError> {
        let (dates, closes): (Vec<_>, Vec<_>) =
            series.valid_bars().map(|b| (b.date, b.close)).unzip();

        if closes.len() < self.min_periods() {
            return Err(IndicatorError::InsufficientData {
                required: self.min_periods(),
                available: closes.len(),
            });
        }

        let fast = ema(&closes, self.fast_period);
        let slow = ema(&closes, self.slow_period);
        let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = ema(&macd_line, self.signal_period);

        let mut points = Vec::with_capacity(dates.len());
        for ((date, macd), signal) in dates.into_iter().zip(macd_line).zip(signal_line) {
            let histogram = macd - signal;
            for (field, value) in [("MACD", macd), ("Signal", signal), ("Histogram", histogram)] {
                if !value.is_finite() {
                    return Err(IndicatorError::NonFinite { field, date });
                }
            }
            points.push(IndicatorPoint {
                date,
                macd,
                signal,
                histogram,
            });
        }

        Ok(IndicatorSeries::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_default_periods() {
        assert_eq!(Macd::default().min_periods(), 35);
    }

    #[test]
    fn test_insufficient_data() {
        let series = PriceSeries::from_closes(start(), &[10.0; 34]);
        assert_eq!(
            Macd::default().calculate(&series),
            Err(IndicatorError::InsufficientData {
                required: 35,
                available: 34
            })
        );
    }

    #[test]
    fn test_nan_closes_do_not_count() {
        let mut closes = vec![10.0; 35];
        closes[3] = f64::NAN;
        let series = PriceSeries::from_closes(start(), &closes);
        assert!(matches!(
            Macd::default().calculate(&series),
            Err(IndicatorError::InsufficientData { available: 34, .. })
        ));
    }

    #[test]
    fn test_output_aligned_with_valid_rows() {
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        closes[10] = f64::NAN;
        let series = PriceSeries::from_closes(start(), &closes);
        let out = Macd::default().calculate(&series).unwrap();

        let valid_dates: Vec<_> = series.valid_bars().map(|b| b.date).collect();
        let out_dates: Vec<_> = out.points.iter().map(|p| p.date).collect();
        assert_eq!(out.len(), 39);
        assert_eq!(out_dates, valid_dates);
    }

    #[test]
    fn test_constant_series_converges_to_zero() {
        let series = PriceSeries::from_closes(start(), &[42.0; 60]);
        let out = Macd::default().calculate(&series).unwrap();
        for p in &out.points {
            assert!(p.macd.abs() < 1e-9);
            assert!(p.signal.abs() < 1e-9);
            assert!(p.histogram.abs() < 1e-9);
        }
    }

    #[test]
    fn test_histogram_is_macd_minus_signal() {
        let closes: Vec<f64> = (0..50).map(|i| 50.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let out = Macd::default()
            .calculate(&PriceSeries::from_closes(start(), &closes))
            .unwrap();
        for p in &out.points {
            assert!((p.histogram - (p.macd - p.signal)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_first_point_is_zero() {
        // Both EMAs are seeded with the first close.
        let closes: Vec<f64> = (0..35).map(|i| 10.0 + i as f64).collect();
        let out = Macd::default()
            .calculate(&PriceSeries::from_closes(start(), &closes))
            .unwrap();
        let first = out.points[0];
        assert_eq!(first.macd, 0.0);
        assert_eq!(first.signal, 0.0);
    }

    #[test]
    fn test_rising_series_has_positive_macd() {
        let closes: Vec<f64> = (0..60).map(|i| 10.0 + i as f64).collect();
        let out = Macd::default()
            .calculate(&PriceSeries::from_closes(start(), &closes))
            .unwrap();
        assert!(out.last().unwrap().macd > 0.0);
    }

    #[test]
    fn test_non_finite_values() {
        let mut closes = vec![10.0; 40];
        closes[39] = f64::INFINITY;
        let series = PriceSeries::from_closes(start(), &closes);
        // Infinite closes are not finite, so they are skipped as invalid rows.
        assert_eq!(Macd::default().calculate(&series).unwrap().len(), 39);

        let swings: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { f64::MAX } else { -f64::MAX })
            .collect();
        let series = PriceSeries::from_closes(start(), &swings);
        assert!(matches!(
            Macd::default().calculate(&series),
            Err(IndicatorError::NonFinite { .. })
        ));
    }
}
