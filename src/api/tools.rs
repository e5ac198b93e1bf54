//! Tool catalogue and invocation endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::ApiResponse;
use crate::error::Result;
use crate::services::tools::{invoke_tool, tool_definitions};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tools))
        .route("/:name", post(call_tool))
}

async fn list_tools() -> Json<ApiResponse<Vec<Value>>> {
    Json(ApiResponse::new(tool_definitions()))
}

/// Run a tool; the request body is its JSON-encoded arguments.
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: String,
) -> Result<Json<ApiResponse<Value>>> {
    let value = invoke_tool(&state.analyzer, state.source.as_ref(), &name, &body)?;
    Ok(Json(ApiResponse::new(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::AnalysisError;
    use crate::services::bar_source::{BarSource, MemorySource};
    use crate::services::signals::Analyzer;
    use crate::types::{Bar, Series};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn state() -> AppState {
        let bars = vec![Bar {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            open: 9.0,
            high: 10.5,
            low: 8.75,
            close: 10.123,
            volume: 1.0,
        }];
        let source: Arc<dyn BarSource> =
            Arc::new(MemorySource::new().with("IBM", Series::new(bars).unwrap()));
        AppState {
            config: Arc::new(Config::default()),
            analyzer: Arc::new(Analyzer::default()),
            source,
        }
    }

    #[tokio::test]
    async fn test_list_tools() {
        let Json(response) = list_tools().await;
        assert_eq!(response.data.len(), 2);
    }

    #[tokio::test]
    async fn test_call_price_tool() {
        let Json(response) = call_tool(
            State(state()),
            Path("get_stock_price".to_string()),
            r#"{"ticker":"ibm"}"#.to_string(),
        )
        .await
        .unwrap();
        assert_eq!(response.data["ticker"], "IBM");
        assert_eq!(response.data["price"], 10.12);
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let err = call_tool(
            State(state()),
            Path("nope".to_string()),
            r#"{"ticker":"IBM"}"#.to_string(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownTool(_)));
    }
}
