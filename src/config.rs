use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::validator::DEFAULT_SYMBOL_CAP;

/// Price download configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Calendar days of history to request.
    pub lookback_days: u32,
    /// Bar interval passed to the provider ("1d", "1wk", ...).
    pub interval: String,
    /// Yahoo Finance base URL.
    pub base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            lookback_days: 60,
            interval: "1d".to_string(),
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Connectivity probe run before every download.
#[derive(Debug, Clone)]
pub struct ConnectivityConfig {
    /// host:port opened over TCP.
    pub probe_addr: String,
    pub timeout_ms: u64,
}

impl ConnectivityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_addr: "8.8.8.8:53".to_string(),
            timeout_ms: 3000,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Maximum number of symbols per analysis run.
    pub symbol_cap: usize,
    pub fetch: FetchConfig,
    pub connectivity: ConnectivityConfig,
    /// Directory that receives exported result files.
    pub export_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch_defaults = FetchConfig::default();
        let probe_defaults = ConnectivityConfig::default();

        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(3001),
            symbol_cap: var("SYMBOL_CAP")
                .and_then(|v| v.parse().ok())
                .filter(|cap| *cap > 0)
                .unwrap_or(DEFAULT_SYMBOL_CAP),
            fetch: FetchConfig {
                lookback_days: var("LOOKBACK_DAYS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(fetch_defaults.lookback_days),
                interval: var("PRICE_INTERVAL").unwrap_or(fetch_defaults.interval),
                base_url: var("YAHOO_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or(fetch_defaults.base_url),
                timeout_secs: var("FETCH_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(fetch_defaults.timeout_secs),
            },
            connectivity: ConnectivityConfig {
                probe_addr: var("CONNECTIVITY_PROBE").unwrap_or(probe_defaults.probe_addr),
                timeout_ms: var("CONNECTIVITY_TIMEOUT_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(probe_defaults.timeout_ms),
            },
            export_dir: var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("exports")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
