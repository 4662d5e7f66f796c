use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Whether a symbol has a usable price series.
///
/// Rendered as `OK`, `INSUFFICIENT_DATA` or `ERROR: <detail>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    InsufficientData,
    Error(String),
}

impl FetchStatus {
    pub fn error(detail: impl Into<String>) -> Self {
        FetchStatus::Error(detail.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, FetchStatus::Ok)
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Ok => f.write_str("OK"),
            FetchStatus::InsufficientData => f.write_str("INSUFFICIENT_DATA"),
            FetchStatus::Error(detail) if detail.is_empty() => f.write_str("ERROR"),
            FetchStatus::Error(detail) => write!(f, "ERROR: {}", detail),
        }
    }
}

impl FromStr for FetchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OK" => Ok(FetchStatus::Ok),
            "INSUFFICIENT_DATA" => Ok(FetchStatus::InsufficientData),
            "ERROR" => Ok(FetchStatus::Error(String::new())),
            other => other
                .strip_prefix("ERROR: ")
                .map(|detail| FetchStatus::Error(detail.to_string()))
                .ok_or_else(|| format!("unknown status: {:?}", other)),
        }
    }
}

impl Serialize for FetchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FetchStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
