//! Function-calling tools for a conversational assistant.
//!
//! The assistant integration lives elsewhere; this module publishes the tool
//! schemas and runs a named tool against a bar source, returning plain JSON.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{AnalysisError, Result};
use crate::services::bar_source::{normalize_ticker, BarSource};
use crate::services::signals::analyzer::Analyzer;
use crate::services::signals::recommendation::round2;

pub const RECOMMENDATION_TOOL: &str = "get_stock_recommendation";
pub const PRICE_TOOL: &str = "get_stock_price";

/// Arguments shared by every tool.
#[derive(Debug, Deserialize)]
struct TickerArgs {
    ticker: String,
}

/// JSON-schema function definitions for every tool.
pub fn tool_definitions() -> Vec<Value> {
    vec![
        ticker_tool(
            RECOMMENDATION_TOOL,
            "Get a buy/sell/hold recommendation with confidence and reasons \
             from SMA, RSI, MACD and volume analysis of the last year.",
        ),
        ticker_tool(PRICE_TOOL, "Get the latest closing price of a stock."),
    ]
}

fn ticker_tool(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "description": description,
        "parameters": {
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Ticker symbol, e.g. AAPL or RELIANCE.NS"
                }
            },
            "required": ["ticker"]
        }
    })
}

/// Run the tool `name` with JSON-encoded `arguments`.
pub fn invoke_tool(
    analyzer: &Analyzer,
    source: &dyn BarSource,
    name: &str,
    arguments: &str,
) -> Result<Value> {
    let args: TickerArgs = serde_json::from_str(arguments)
        .map_err(|e| AnalysisError::InvalidArguments(e.to_string()))?;
    let ticker = normalize_ticker(&args.ticker)
        .map_err(|e| AnalysisError::InvalidArguments(e.to_string()))?;

    info!("Tool call {} for {}", name, ticker);

    match name {
        RECOMMENDATION_TOOL => {
            let recommendation = analyzer.evaluate_ticker(source, &ticker)?;
            Ok(serde_json::to_value(recommendation)?)
        }
        PRICE_TOOL => {
            let price = source.latest_price(&ticker)?;
            Ok(json!({ "ticker": ticker, "price": round2(price) }))
        }
        other => Err(AnalysisError::UnknownTool(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::bar_source::MemorySource;
    use crate::types::{Bar, Series};
    use chrono::{Duration, NaiveDate};

    fn source() -> MemorySource {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..60)
            .map(|i| {
                let close = 100.0 + i as f64 * 0.25;
                Bar {
                    date: start + Duration::days(i),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 10_000.0,
                }
            })
            .collect();
        MemorySource::new().with("AAPL", Series::new(bars).unwrap())
    }

    #[test]
    fn test_tool_definitions() {
        let defs = tool_definitions();
        assert_eq!(defs.len(), 2);
        for def in &defs {
            assert_eq!(def["parameters"]["required"], json!(["ticker"]));
            assert_eq!(def["parameters"]["properties"]["ticker"]["type"], "string");
        }
        assert_eq!(defs[0]["name"], RECOMMENDATION_TOOL);
        assert_eq!(defs[1]["name"], PRICE_TOOL);
    }

    #[test]
    fn test_invoke_recommendation() {
        let value = invoke_tool(
            &Analyzer::default(),
            &source(),
            RECOMMENDATION_TOOL,
            r#"{"ticker":"aapl"}"#,
        )
        .unwrap();
        assert_eq!(value["ticker"], "AAPL");
        assert!(value["verdict"].is_string());
        assert!(value["reasons"].is_array());
        assert_eq!(value["currentPrice"], 114.75);
    }

    #[test]
    fn test_invoke_price() {
        let value = invoke_tool(
            &Analyzer::default(),
            &source(),
            PRICE_TOOL,
            r#"{"ticker":"AAPL"}"#,
        )
        .unwrap();
        assert_eq!(value, json!({"ticker": "AAPL", "price": 114.75}));
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let err = invoke_tool(
            &Analyzer::default(),
            &source(),
            "plot_chart",
            r#"{"ticker":"AAPL"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownTool(_)));
    }

    #[test]
    fn test_invoke_missing_ticker() {
        let err = invoke_tool(&Analyzer::default(), &source(), PRICE_TOOL, "{}").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArguments(_)));

        let err = invoke_tool(
            &Analyzer::default(),
            &source(),
            PRICE_TOOL,
            r#"{"ticker":"  "}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArguments(_)));
    }

    #[test]
    fn test_invoke_unknown_ticker() {
        let err = invoke_tool(
            &Analyzer::default(),
            &source(),
            RECOMMENDATION_TOOL,
            r#"{"ticker":"ZZZZ"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::NoData(_)));
    }
}
