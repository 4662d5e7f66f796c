use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::AnalysisError;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Symbol list rejected")]
    Rejected(Vec<String>),

    #[error("Price data unavailable")]
    Unavailable(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AppError {
    /// Prepend earlier diagnostics to a rejection.
    pub fn with_leading_messages(self, leading: Vec<String>) -> Self {
        let join = |mut rest: Vec<String>| {
            let mut all = leading.clone();
            all.append(&mut rest);
            all
        };
        match self {
            AppError::Rejected(m) => AppError::Rejected(join(m)),
            AppError::Unavailable(m) => AppError::Unavailable(join(m)),
            other => other,
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let messages = err.messages();
        match err {
            AnalysisError::Rejected(_) => AppError::Rejected(messages),
            AnalysisError::Fetch { .. } => AppError::Unavailable(messages),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, messages) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), Vec::new()),
            AppError::Rejected(m) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string(), m.clone()),
            AppError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string(), m.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), Vec::new()),
            AppError::SerdeJson(e) => (StatusCode::BAD_REQUEST, e.to_string(), Vec::new()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
            "messages": messages,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
