//! Analysis endpoint.

use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::symbols::{import_raw, SpreadsheetInput, SymbolInput};
use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::{self, results, AnalysisRun, RunOptions};
use crate::sources::{FetchRequest, PriceSource};
use crate::types::SignalFilter;
use crate::AppState;

/// Query parameters for the analysis endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    /// all, buy, sell or neutral
    pub signal: Option<String>,
}

impl AnalyzeQuery {
    fn filter(&self) -> Result<SignalFilter> {
        match self.signal.as_deref() {
            None => Ok(SignalFilter::All),
            Some(s) => SignalFilter::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown signal filter: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub symbols: Option<SymbolInput>,
    #[serde(default)]
    pub truncate: bool,
    /// Spreadsheet used when no manual symbols are given.
    pub source: Option<SpreadsheetInput>,
}

/// Symbols chosen for one run and the diagnostics gathered while choosing them.
#[derive(Debug)]
struct RunInput {
    raw: Vec<String>,
    truncate: bool,
    leading: Vec<String>,
}

impl AnalyzeRequest {
    /// A spreadsheet with a column takes precedence over manual symbols.
    fn into_input(self, cap: usize) -> Result<RunInput> {
        match self.source {
            Some(sheet) if !sheet.column.trim().is_empty() => {
                let (raw, messages) = import_raw(&sheet, cap);
                if raw.is_empty() {
                    // The import diagnostic already explains the empty list.
                    return Err(AppError::Rejected(messages));
                }
                // Spreadsheet input is always truncated to the cap.
                Ok(RunInput {
                    raw,
                    truncate: true,
                    leading: messages,
                })
            }
            _ => Ok(RunInput {
                raw: self.symbols.map(SymbolInput::into_raw).unwrap_or_default(),
                truncate: self.truncate,
                leading: Vec::new(),
            }),
        }
    }
}

/// Create the analysis router.
pub fn router<S: PriceSource + 'static>() -> Router<AppState<S>> {
    Router::new().route("/api/analyze", post(analyze::<S>))
}

/// Run the scanner over the requested symbols.
async fn analyze<S: PriceSource + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<AnalyzeQuery>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalysisRun>>> {
    let filter = query.filter()?;
    let cap = state.config.symbol_cap;
    let RunInput {
        raw,
        truncate,
        leading,
    } = request.into_input(cap)?;

    let options = RunOptions {
        truncate,
        cap,
        request: FetchRequest::from(&state.config.fetch),
    };

    let mut run = services::run(state.source.as_ref(), &raw, &options)
        .await
        .map_err(|e| AppError::from(e).with_leading_messages(leading.clone()))?;

    let mut messages = leading;
    messages.append(&mut run.messages);
    run.messages = messages;

    if filter != SignalFilter::All {
        debug!("Filtering {} results by {:?}", run.results.len(), filter);
        run.results = results::filter(&run.results, filter);
    }

    Ok(Json(ApiResponse::new(run)))
}
