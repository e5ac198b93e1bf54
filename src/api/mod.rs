pub mod health;
pub mod recommendation;
pub mod tools;

use crate::AppState;
use axum::Router;
use serde::Serialize;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Number of bars the response was computed from, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bars: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta { bars: None },
        }
    }

    pub fn with_bars(data: T, bars: usize) -> Self {
        Self {
            data,
            meta: ApiMeta { bars: Some(bars) },
        }
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(recommendation::router())
        .nest("/api/tools", tools::router())
}
