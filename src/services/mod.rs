pub mod analysis;
pub mod results;
pub mod signals;
pub mod spreadsheet;
pub mod validator;

pub use analysis::{run, AnalysisError, AnalysisRun, RunOptions};
pub use spreadsheet::{export_results, load_symbols, read_results, ExportOutcome, SymbolImport};
pub use validator::{validate, ValidationReport, DEFAULT_SYMBOL_CAP};
