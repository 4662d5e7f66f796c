pub mod analyze;
pub mod export;
pub mod health;
pub mod symbols;

use axum::Router;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::sources::PriceSource;
use crate::AppState;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// Response time in milliseconds since the epoch.
    pub generated_at: i64,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta {
                generated_at: chrono::Utc::now().timestamp_millis(),
            },
        }
    }
}

/// Create the API router.
pub fn router<S: PriceSource + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::router::<S>())
        .merge(analyze::router::<S>())
        .merge(export::router::<S>())
        .nest("/api/symbols", symbols::router::<S>())
}

/// Full application with middleware and state applied.
pub fn app<S: PriceSource + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(router::<S>())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
