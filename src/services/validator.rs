//! Symbol list validation.
//!
//! Turns raw ticker strings into a deduplicated, alphabetic, capped symbol
//! list. Problems never fail the call; they surface as diagnostics.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::messages::{render, MessageCode};
use crate::types::Symbol;

/// Default maximum number of symbols per analysis run.
pub const DEFAULT_SYMBOL_CAP: usize = 20;

/// Entries removed during validation, by reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedSymbols {
    pub duplicates: Vec<String>,
    pub invalid: Vec<String>,
    pub excess: Vec<String>,
}

/// Outcome of validating one raw symbol list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub symbols: Vec<Symbol>,
    pub messages: Vec<String>,
    pub removed: RemovedSymbols,
    pub cap: usize,
}

impl ValidationReport {
    /// Whether the symbol list may proceed to analysis.
    pub fn can_continue(&self) -> bool {
        !self.symbols.is_empty() && self.symbols.len() <= self.cap
    }
}

/// Validate a raw symbol list.
///
/// Steps, each with an optional diagnostic:
/// 1. trim, uppercase and drop blank entries;
/// 2. remove duplicates, keeping the first occurrence;
/// 3. drop entries that are not one or more ASCII letters;
/// 4. enforce `cap`, truncating only when `truncate` is set;
/// 5. report an empty result.
pub fn validate<S: AsRef<str>>(raw_symbols: &[S], truncate: bool, cap: usize) -> ValidationReport {
    let mut removed = RemovedSymbols::default();
    let mut messages = Vec::new();

    let normalized = raw_symbols
        .iter()
        .map(|s| Symbol::normalize(s.as_ref()))
        .filter(|s| !s.is_empty());

    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for entry in normalized {
        if seen.insert(entry.clone()) {
            unique.push(entry);
        } else if !removed.duplicates.contains(&entry) {
            removed.duplicates.push(entry);
        }
    }
    if !removed.duplicates.is_empty() {
        messages.push(render(
            MessageCode::ValidationDuplicates,
            &[("duplicates", &removed.duplicates.join(", "))],
        ));
    }

    let mut symbols = Vec::with_capacity(unique.len());
    for entry in unique {
        match Symbol::parse(&entry) {
            Some(symbol) => symbols.push(symbol),
            None => removed.invalid.push(entry),
        }
    }
    if !removed.invalid.is_empty() {
        messages.push(render(
            MessageCode::ValidationSymbols,
            &[("invalid", &removed.invalid.join(", "))],
        ));
    }

    if symbols.len() > cap {
        removed.excess = symbols[cap..].iter().map(|s| s.to_string()).collect();
        let cap_str = cap.to_string();
        if truncate {
            symbols.truncate(cap);
            messages.push(render(MessageCode::ValidationTooMany, &[("cap", &cap_str)]));
        } else {
            messages.push(render(
                MessageCode::ValidationExcessManual,
                &[("cap", &cap_str), ("excess", &removed.excess.join(", "))],
            ));
        }
    }

    if symbols.is_empty() {
        messages.push(render(MessageCode::ValidationEmpty, &[]));
    }

    debug!(
        valid = symbols.len(),
        duplicates = removed.duplicates.len(),
        invalid = removed.invalid.len(),
        excess = removed.excess.len(),
        "Validated symbol list"
    );

    ValidationReport {
        symbols,
        messages,
        removed,
        cap,
    }
}

/// Validate user input, reporting `NO_SYMBOLS` when nothing was supplied.
pub fn validate_input<S: AsRef<str>>(raw_symbols: &[S], truncate: bool, cap: usize) -> ValidationReport {
    if raw_symbols.iter().all(|s| s.as_ref().trim().is_empty()) {
        return ValidationReport {
            messages: vec![render(MessageCode::NoSymbols, &[])],
            cap,
            ..Default::default()
        };
    }
    validate(raw_symbols, truncate, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(report: &ValidationReport) -> Vec<&str> {
        report.symbols.iter().map(|s| s.as_str()).collect()
    }

    // =========================================================================
    // Deduplication Tests
    // =========================================================================

    #[test]
    fn test_duplicates_removed_keeping_first_occurrence() {
        let report = validate(&["MSFT", "AAPL", "MSFT", "GOOG", "AAPL"], false, 20);
        assert_eq!(names(&report), vec!["MSFT", "AAPL", "GOOG"]);
        assert_eq!(report.removed.duplicates, vec!["MSFT", "AAPL"]);
        assert_eq!(report.messages.len(), 1);
        assert!(report.messages[0].contains("MSFT, AAPL"));
    }

    #[test]
    fn test_duplicates_detected_after_normalization() {
        let report = validate(&["aapl", " AAPL "], false, 20);
        assert_eq!(names(&report), vec!["AAPL"]);
        assert_eq!(report.removed.duplicates, vec!["AAPL"]);
    }

    #[test]
    fn test_no_duplicate_message_without_duplicates() {
        let report = validate(&["AAPL", "MSFT"], false, 20);
        assert!(report.messages.is_empty());
        assert!(report.can_continue());
    }

    // =========================================================================
    // Character Filter Tests
    // =========================================================================

    #[test]
    fn test_invalid_symbols_dropped_not_repaired() {
        let report = validate(&["AAPL", "BRK.B", "SYM1", "X-Y", "msft"], false, 20);
        assert_eq!(names(&report), vec!["AAPL", "MSFT"]);
        assert_eq!(report.removed.invalid, vec!["BRK.B", "SYM1", "X-Y"]);
        assert_eq!(report.messages.len(), 1);
        assert!(report.messages[0].contains("BRK.B, SYM1, X-Y"));
    }

    #[test]
    fn test_blank_entries_ignored() {
        let report = validate(&["", "  ", "IBM"], false, 20);
        assert_eq!(names(&report), vec!["IBM"]);
        assert!(report.messages.is_empty());
    }

    // =========================================================================
    // Cap Tests
    // =========================================================================

    fn many(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| {
                let a = (b'A' + (i / 26) as u8) as char;
                let b = (b'A' + (i % 26) as u8) as char;
                format!("S{}{}", a, b)
            })
            .collect()
    }

    #[test]
    fn test_truncate_keeps_first_cap() {
        let raw = many(25);
        let report = validate(&raw, true, 20);
        assert_eq!(report.symbols.len(), 20);
        assert_eq!(report.symbols[19].as_str(), raw[19]);
        assert_eq!(report.removed.excess, raw[20..].to_vec());
        assert_eq!(
            report.messages,
            vec![render(MessageCode::ValidationTooMany, &[("cap", "20")])]
        );
        assert!(report.can_continue());
    }

    #[test]
    fn test_without_truncate_reports_excess_and_keeps_all() {
        let raw = many(22);
        let report = validate(&raw, false, 20);
        assert_eq!(report.symbols.len(), 22);
        assert_eq!(report.removed.excess, raw[20..].to_vec());
        assert_eq!(report.messages.len(), 1);
        assert!(report.messages[0].contains(&raw[21]));
        assert!(!report.can_continue());
    }

    #[test]
    fn test_cap_applies_after_filtering() {
        let mut raw = many(20);
        raw.push("BAD1".to_string());
        raw.push(raw[0].clone());
        let report = validate(&raw, false, 20);
        assert_eq!(report.symbols.len(), 20);
        assert!(report.removed.excess.is_empty());
        assert!(report.can_continue());
    }

    #[test]
    fn test_custom_cap() {
        let report = validate(&["A", "B", "C"], true, 2);
        assert_eq!(names(&report), vec!["A", "B"]);
        assert_eq!(report.cap, 2);
    }

    // =========================================================================
    // Empty Result Tests
    // =========================================================================

    #[test]
    fn test_empty_input() {
        let report = validate::<&str>(&[], true, 20);
        assert!(report.symbols.is_empty());
        assert_eq!(report.messages, vec![render(MessageCode::ValidationEmpty, &[])]);
        assert!(!report.can_continue());
    }

    #[test]
    fn test_all_invalid_reports_both() {
        let report = validate(&["123", "$$"], true, 20);
        assert!(report.symbols.is_empty());
        assert_eq!(report.messages.len(), 2);
        assert_eq!(report.messages[1], render(MessageCode::ValidationEmpty, &[]));
    }

    #[test]
    fn test_no_input_reports_no_symbols() {
        let report = validate_input(&["", " "], false, 20);
        assert_eq!(report.messages, vec![render(MessageCode::NoSymbols, &[])]);
        assert!(!report.can_continue());

        let report = validate_input(&["ibm"], false, 20);
        assert_eq!(names(&report), vec!["IBM"]);
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    #[test]
    fn test_output_invariants() {
        let raw = vec![
            "aapl", "AAPL", "msft", "T", "brk.b", "", "GOOG", "goog", "Z9", "nvda", "amd",
        ];
        let report = validate(&raw, true, 4);
        let mut seen = HashSet::new();
        for symbol in &report.symbols {
            assert!(seen.insert(symbol.clone()));
            assert!(symbol.as_str().chars().all(|c| c.is_ascii_uppercase()));
        }
        assert!(report.symbols.len() <= 4);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let raw = vec!["aapl", "AAPL", "msft", "x1", "goog"];
        let first = validate(&raw, true, 20);
        let again: Vec<&str> = first.symbols.iter().map(|s| s.as_str()).collect();
        let second = validate(&again, true, 20);
        assert_eq!(second.symbols, first.symbols);
        assert!(second.messages.is_empty());
    }
}
