//! Recommendation, indicator and price endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiResponse;
use crate::error::{AnalysisError, Result};
use crate::services::bar_source::normalize_ticker;
use crate::services::signals::recommendation::round2;
use crate::types::{IndicatorReport, Recommendation};
use crate::AppState;

/// Query parameters for the indicators endpoint.
#[derive(Debug, Deserialize)]
pub struct IndicatorsQuery {
    /// SMA/EMA window; defaults to the short trend window.
    pub window: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub tickers: Vec<String>,
}

/// One batch entry: either a recommendation or the error that prevented it.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub ticker: String,
    pub price: f64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/recommendation/:ticker", get(get_recommendation))
        .route("/api/recommendations", post(post_recommendations))
        .route("/api/indicators/:ticker", get(get_indicators))
        .route("/api/price/:ticker", get(get_price))
}

/// Get the buy/sell/hold recommendation for a ticker.
async fn get_recommendation(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse<Recommendation>>> {
    let ticker = normalize_ticker(&ticker)?;
    let series = state.source.history(&ticker)?;
    let recommendation = state.analyzer.evaluate(&ticker, &series)?;

    info!(
        "Recommendation for {}: {} ({})",
        ticker, recommendation.verdict, recommendation.confidence
    );

    Ok(Json(ApiResponse::with_bars(recommendation, series.len())))
}

/// Evaluate several tickers at once.
async fn post_recommendations(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<ApiResponse<Vec<BatchEntry>>>> {
    if request.tickers.is_empty() {
        return Err(AnalysisError::InvalidParameter(
            "tickers must not be empty".to_string(),
        ));
    }

    let results = state
        .analyzer
        .evaluate_many(state.source.clone(), &request.tickers)
        .await;

    let entries = results
        .into_iter()
        .map(|(ticker, result)| match result {
            Ok(recommendation) => BatchEntry {
                ticker,
                recommendation: Some(recommendation),
                error: None,
            },
            Err(e) => BatchEntry {
                ticker,
                recommendation: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    Ok(Json(ApiResponse::new(entries)))
}

/// Get full indicator lines for charting.
async fn get_indicators(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<IndicatorsQuery>,
) -> Result<Json<ApiResponse<IndicatorReport>>> {
    let ticker = normalize_ticker(&ticker)?;
    let window = query
        .window
        .unwrap_or(state.analyzer.config().sma_short_window);
    let series = state.source.history(&ticker)?;
    let report = state.analyzer.indicator_report(&ticker, &series, window)?;

    Ok(Json(ApiResponse::with_bars(report, series.len())))
}

/// Get the latest close for a ticker.
async fn get_price(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse<PriceResponse>>> {
    let ticker = normalize_ticker(&ticker)?;
    let price = state.source.latest_price(&ticker)?;

    Ok(Json(ApiResponse::new(PriceResponse {
        ticker,
        price: round2(price),
    })))
}
