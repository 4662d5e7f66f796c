//! MACD Scanner - daily MACD crossover scanner for stock symbols

pub mod api;
pub mod config;
pub mod error;
pub mod messages;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use config::Config;
use sources::YahooFinanceClient;

/// Application state shared across handlers.
pub struct AppState<S = YahooFinanceClient> {
    pub config: Arc<Config>,
    pub source: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(config: Config, source: S) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            source: self.source.clone(),
        }
    }
}
