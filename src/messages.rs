//! User-facing diagnostic catalog.
//!
//! Every diagnostic is keyed by a stable code and rendered from a template
//! with `{name}` placeholders. Unknown codes render the `UNKNOWN` message.

/// Stable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCode {
    ExcelLoad,
    ExcelColumn,
    ExcelColumnNull,
    ExcelTruncate,
    ValidationExcessManual,
    ValidationDuplicates,
    ValidationSymbols,
    ValidationTooMany,
    ValidationEmpty,
    NoSymbols,
    Unknown,
    ExportEmpty,
    ExportPermission,
    ExportUnknown,
    NoInternet,
    ApiLimit,
    ApiError,
}

impl MessageCode {
    const ALL: [MessageCode; 17] = [
        Self::ExcelLoad,
        Self::ExcelColumn,
        Self::ExcelColumnNull,
        Self::ExcelTruncate,
        Self::ValidationExcessManual,
        Self::ValidationDuplicates,
        Self::ValidationSymbols,
        Self::ValidationTooMany,
        Self::ValidationEmpty,
        Self::NoSymbols,
        Self::Unknown,
        Self::ExportEmpty,
        Self::ExportPermission,
        Self::ExportUnknown,
        Self::NoInternet,
        Self::ApiLimit,
        Self::ApiError,
    ];

    /// Stable string code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExcelLoad => "EXCEL_LOAD",
            Self::ExcelColumn => "EXCEL_COLUMN",
            Self::ExcelColumnNull => "EXCEL_COLUMN_NULL",
            Self::ExcelTruncate => "EXCEL_TRUNCATE",
            Self::ValidationExcessManual => "VALIDATION_EXCESS_MANUAL",
            Self::ValidationDuplicates => "VALIDATION_DUPLICATES",
            Self::ValidationSymbols => "VALIDATION_SYMBOLS",
            Self::ValidationTooMany => "VALIDATION_TOO_MANY",
            Self::ValidationEmpty => "VALIDATION_EMPTY",
            Self::NoSymbols => "NO_SYMBOLS",
            Self::Unknown => "UNKNOWN",
            Self::ExportEmpty => "EXPORT_EMPTY",
            Self::ExportPermission => "EXPORT_PERMISSION",
            Self::ExportUnknown => "EXPORT_UNKNOWN",
            Self::NoInternet => "NO_INTERNET",
            Self::ApiLimit => "API_LIMIT",
            Self::ApiError => "API_ERROR",
        }
    }

    /// Look up a code by its string form.
    pub fn from_str(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Template text with `{name}` placeholders.
    pub fn template(&self) -> &'static str {
        match self {
            Self::ExcelLoad => "Failed to load the spreadsheet. Check the file path or format.",
            Self::ExcelColumn => "Column '{column}' does not exist in the spreadsheet.",
            Self::ExcelColumnNull => "Column '{column}' of the selected spreadsheet contains no data.",
            Self::ExcelTruncate => {
                "The spreadsheet contained more than {cap} symbols. Only the first {cap} were kept."
            }
            Self::ValidationExcessManual => {
                "The limit of {cap} valid symbols was exceeded. Remove the excess symbols to continue: {excess}."
            }
            Self::ValidationDuplicates => "Duplicate symbols were removed from the list: {duplicates}.",
            Self::ValidationSymbols => {
                "Some symbols contain invalid characters: {invalid}. Only letters (A-Z) are allowed."
            }
            Self::ValidationTooMany => {
                "The list contains more than {cap} symbols. It was truncated to the first {cap}."
            }
            Self::ValidationEmpty => "No valid symbols remain after validation.",
            Self::NoSymbols => "Enter symbols manually or upload a valid spreadsheet.",
            Self::Unknown => "An unknown error occurred. Contact technical support.",
            Self::ExportEmpty => "There are no results to export.",
            Self::ExportPermission => {
                "Cannot write file '{filename}'. Make sure it is not open and that you have write permission."
            }
            Self::ExportUnknown => "An error occurred while exporting the spreadsheet: {error}",
            Self::NoInternet => "No Internet connection detected. Check your connection and try again.",
            Self::ApiLimit => "The price provider rejected the request (too many requests). Try again later.",
            Self::ApiError => "The price provider returned an error: {error}",
        }
    }
}

/// Render a diagnostic, substituting `{name}` placeholders from `params`.
pub fn render(code: MessageCode, params: &[(&str, &str)]) -> String {
    let mut message = code.template().to_string();
    for (name, value) in params {
        message = message.replace(&format!("{{{}}}", name), value);
    }
    message
}

/// Render a diagnostic by string code; unknown codes fall back to `UNKNOWN`.
pub fn render_code(code: &str, params: &[(&str, &str)]) -> String {
    render(
        MessageCode::from_str(code).unwrap_or(MessageCode::Unknown),
        params,
    )
}
