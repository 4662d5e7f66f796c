//! Symbol list endpoints.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::services::{spreadsheet, validator, ValidationReport};
use crate::types::split_manual_input;
use crate::AppState;

/// Symbols as a JSON list or as comma separated text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SymbolInput {
    List(Vec<String>),
    Text(String),
}

impl SymbolInput {
    pub fn into_raw(self) -> Vec<String> {
        match self {
            SymbolInput::List(list) => list,
            SymbolInput::Text(text) => split_manual_input(&text),
        }
    }
}

/// A CSV document and the column holding the symbols.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetInput {
    pub csv: String,
    pub column: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub symbols: Option<SymbolInput>,
    #[serde(default)]
    pub truncate: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    #[serde(flatten)]
    pub report: ValidationReport,
    pub can_continue: bool,
}

impl From<ValidationReport> for ValidateResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            can_continue: report.can_continue(),
            report,
        }
    }
}

/// Raw symbols read from a spreadsheet plus the import diagnostic, if any.
pub(crate) fn import_raw(input: &SpreadsheetInput, cap: usize) -> (Vec<String>, Vec<String>) {
    let import = spreadsheet::load_symbols(input.csv.as_bytes(), &input.column, true, cap);
    (import.symbols, import.message.into_iter().collect())
}

/// Create the symbols router.
pub fn router<S: Send + Sync + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/validate", post(validate_symbols::<S>))
        .route("/import", post(import_symbols::<S>))
}

/// Validate a manually entered symbol list.
async fn validate_symbols<S: Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<ValidateRequest>,
) -> Json<ApiResponse<ValidateResponse>> {
    let raw = request.symbols.map(SymbolInput::into_raw).unwrap_or_default();
    let report = validator::validate_input(&raw, request.truncate, state.config.symbol_cap);
    Json(ApiResponse::new(report.into()))
}

/// Import symbols from a CSV column, then validate them with truncation.
async fn import_symbols<S: Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(input): Json<SpreadsheetInput>,
) -> Json<ApiResponse<ValidateResponse>> {
    let cap = state.config.symbol_cap;
    let (raw, mut messages) = import_raw(&input, cap);

    let mut report = if raw.is_empty() {
        ValidationReport {
            cap,
            ..Default::default()
        }
    } else {
        validator::validate(&raw, true, cap)
    };
    messages.append(&mut report.messages);
    report.messages = messages;

    Json(ApiResponse::new(report.into()))
}
