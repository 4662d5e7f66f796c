//! MACD signal generation.
//!
//! Indicator lines are computed per symbol and reduced to a single
//! BUY/SELL/NEUTRAL classification from the latest crossover.

pub mod classifier;
pub mod indicators;

pub use classifier::{classify, classify_series};
pub use indicators::{compute, IndicatorOutput};
