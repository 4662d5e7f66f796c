use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Map keyed by ticker symbol, iterated in symbol order.
pub type SymbolMap<T> = BTreeMap<Symbol, T>;

/// A validated ticker symbol: one or more uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalize raw user input (trim + uppercase) without validating it.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Check whether a string is made of ASCII letters only.
    pub fn is_valid(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Parse raw input into a symbol, normalizing case and whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = Self::normalize(raw);
        if Self::is_valid(&normalized) {
            Some(Self(normalized))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid symbol: {:?}", value))
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Split a comma-separated manual entry into normalized, non-blank entries.
pub fn split_manual_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(Symbol::normalize)
        .filter(|s| !s.is_empty())
        .collect()
}
