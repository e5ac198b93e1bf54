use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Where bar files are read from.
    data_dir: String,
    lookback_days: u32,
    sma_windows: [usize; 2],
    rsi_period: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let analysis = state.analyzer.config();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        data_dir: state.config.data_dir.display().to_string(),
        lookback_days: state.config.lookback_days,
        sma_windows: [analysis.sma_short_window, analysis.sma_long_window],
        rsi_period: analysis.rsi_period,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
