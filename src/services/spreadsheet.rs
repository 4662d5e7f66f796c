//! CSV spreadsheet import and export.
//!
//! Every public function here reports failures as diagnostics rather than
//! errors; `SpreadsheetError` stays internal to the adapter.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::messages::{render, MessageCode};
use crate::types::{AnalysisResults, Classification, FetchStatus, ResultRecord, Symbol};

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid row for {symbol}: {reason}")]
    InvalidRow { symbol: String, reason: String },
    #[error("Invalid file name: {0}")]
    InvalidFilename(String),
}

impl SpreadsheetError {
    fn is_permission_denied(&self) -> bool {
        let io_err = match self {
            SpreadsheetError::Io(e) => Some(e),
            SpreadsheetError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(e) => Some(e),
                _ => None,
            },
            _ => None,
        };
        io_err.is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied)
    }
}

// =============================================================================
// Import
// =============================================================================

/// Symbols read from one spreadsheet column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolImport {
    pub symbols: Vec<String>,
    pub message: Option<String>,
}

impl SymbolImport {
    fn failed(message: String) -> Self {
        Self {
            symbols: Vec::new(),
            message: Some(message),
        }
    }
}

/// Read the cells of `column` from CSV data.
///
/// Blank cells are skipped and the rest are trimmed and uppercased. With
/// `truncate`, only the first `cap` entries are kept.
pub fn load_symbols<R: io::Read>(reader: R, column: &str, truncate: bool, cap: usize) -> SymbolImport {
    let mut symbols = match read_column(reader, column) {
        Ok(cells) => cells,
        Err(SpreadsheetError::MissingColumn(name)) => {
            warn!("Spreadsheet has no column {:?}", name);
            return SymbolImport::failed(render(MessageCode::ExcelColumn, &[("column", &name)]));
        }
        Err(e) => {
            warn!("Failed to read spreadsheet: {}", e);
            return SymbolImport::failed(render(MessageCode::ExcelLoad, &[]));
        }
    };

    if symbols.is_empty() {
        return SymbolImport::failed(render(MessageCode::ExcelColumnNull, &[("column", column)]));
    }

    let mut message = None;
    if truncate && symbols.len() > cap {
        debug!("Truncating {} imported symbols to {}", symbols.len(), cap);
        symbols.truncate(cap);
        message = Some(render(MessageCode::ExcelTruncate, &[("cap", &cap.to_string())]));
    }

    SymbolImport { symbols, message }
}

/// Same as [`load_symbols`], reading from a file.
pub fn load_symbols_from_path(path: &Path, column: &str, truncate: bool, cap: usize) -> SymbolImport {
    match File::open(path) {
        Ok(file) => load_symbols(file, column, truncate, cap),
        Err(e) => {
            warn!("Cannot open spreadsheet {}: {}", path.display(), e);
            SymbolImport::failed(render(MessageCode::ExcelLoad, &[]))
        }
    }
}

fn read_column<R: io::Read>(reader: R, column: &str) -> Result<Vec<String>, SpreadsheetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let index = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SpreadsheetError::MissingColumn(column.to_string()))?;

    let mut cells = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(cell) = record.get(index).map(str::trim).filter(|c| !c.is_empty()) {
            cells.push(cell.to_uppercase());
        }
    }
    Ok(cells)
}

// =============================================================================
// Export
// =============================================================================

/// Result of an export attempt: the written path, or a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub success: bool,
    pub file_or_message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResultRow {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Signal")]
    signal: String,
}

/// Default export file name, stamped with the local time.
pub fn default_filename() -> String {
    Local::now().format("macd_results_%Y%m%d_%H%M%S.csv").to_string()
}

/// Write `results` as CSV into `dir`.
pub fn export_results(results: &AnalysisResults, dir: &Path, filename: Option<&str>) -> ExportOutcome {
    if results.is_empty() {
        return ExportOutcome {
            success: false,
            file_or_message: render(MessageCode::ExportEmpty, &[]),
        };
    }

    let filename = filename
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .unwrap_or_else(default_filename);

    let written = plain_filename(&filename).and_then(|name| {
        let path = dir.join(name);
        write_results(results, &path).map(|()| path)
    });

    match written {
        Ok(path) => {
            info!("Exported {} results to {}", results.len(), path.display());
            ExportOutcome {
                success: true,
                file_or_message: path.display().to_string(),
            }
        }
        Err(e) => {
            warn!("Export of {} into {} failed: {}", filename, dir.display(), e);
            ExportOutcome {
                success: false,
                file_or_message: failure_message(&e, &filename),
            }
        }
    }
}

/// Accept only a bare file name so exports stay inside the export directory.
fn plain_filename(filename: &str) -> Result<&str, SpreadsheetError> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(filename),
        _ => Err(SpreadsheetError::InvalidFilename(filename.to_string())),
    }
}

fn failure_message(error: &SpreadsheetError, filename: &str) -> String {
    if error.is_permission_denied() {
        render(MessageCode::ExportPermission, &[("filename", filename)])
    } else {
        render(MessageCode::ExportUnknown, &[("error", &error.to_string())])
    }
}

fn write_results(results: &AnalysisResults, path: &Path) -> Result<(), SpreadsheetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in results.records() {
        writer.serialize(ResultRow {
            symbol: record.symbol.to_string(),
            status: record.status.to_string(),
            signal: record.signal.to_string(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Read an exported result file back.
pub fn read_results(path: &Path) -> Result<AnalysisResults, SpreadsheetError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in rdr.deserialize::<ResultRow>() {
        let row = row?;
        let invalid = |reason: &str| SpreadsheetError::InvalidRow {
            symbol: row.symbol.clone(),
            reason: reason.to_string(),
        };

        let symbol = Symbol::parse(&row.symbol).ok_or_else(|| invalid("bad symbol"))?;
        let status: FetchStatus = row.status.parse().map_err(|e: String| invalid(&e))?;
        let signal = Classification::from_str(&row.signal).ok_or_else(|| invalid("bad signal"))?;

        records.push(ResultRecord {
            symbol,
            status,
            signal,
        });
    }

    Ok(AnalysisResults::new(records))
}
