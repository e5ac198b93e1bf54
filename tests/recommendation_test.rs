//! End-to-end recommendation scenarios

use augur::config::AnalysisConfig;
use augur::services::signals::{resolve_verdict, score, Analyzer, ScoreInputs};
use augur::services::{invoke_tool, MemorySource};
use augur::types::*;
use chrono::{Duration, NaiveDate};

fn series_with_volume(closes: &[f64], volumes: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| Bar {
            date: start + Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        })
        .collect();
    Series::new(bars).unwrap()
}

fn series(closes: &[f64]) -> Series {
    series_with_volume(closes, &vec![1_000.0; closes.len()])
}

fn breakout() -> Vec<f64> {
    let mut closes = vec![10.0; 200];
    closes.extend([50.0; 25]);
    closes.extend([47.0, 44.0, 41.0, 38.0, 35.0]);
    closes
}

fn evaluate(closes: &[f64]) -> Recommendation {
    Analyzer::default().evaluate("test", &series(closes)).unwrap()
}

#[test]
fn test_constant_series() {
    let rec = evaluate(&[100.0; 250]);
    assert_eq!(rec.verdict, Verdict::Sell);
    assert_eq!(rec.confidence, Confidence::Moderate);
    assert_eq!((rec.buy_signals, rec.sell_signals), (0, 2));
    assert_eq!(rec.rsi_latest, Some(50.0));
    assert_eq!(rec.current_price, 100.0);
    assert_eq!(
        rec.reasons,
        vec!["Price below 50-day SMA", "MACD below signal line (bearish)"]
    );
}

#[test]
fn test_steady_uptrend_is_offset_by_overbought_rsi() {
    let closes: Vec<f64> = (0..220).map(|i| 50.0 + i as f64).collect();
    let rec = evaluate(&closes);
    assert_eq!((rec.buy_signals, rec.sell_signals), (3, 2));
    assert_eq!(rec.verdict, Verdict::Hold);
    assert_eq!(rec.confidence, Confidence::Neutral);
    assert_eq!(rec.rsi_latest, Some(100.0));
    assert_eq!(
        rec.reasons,
        vec![
            "Strong uptrend: Price above 50-day and 200-day SMA",
            "RSI indicates overbought (100.00)",
            "MACD above signal line (bullish)",
        ]
    );
}

#[test]
fn test_steady_downtrend_holds() {
    let closes: Vec<f64> = (0..220).map(|i| 400.0 - i as f64).collect();
    let rec = evaluate(&closes);
    assert_eq!((rec.buy_signals, rec.sell_signals), (2, 3));
    assert_eq!(rec.verdict, Verdict::Hold);
    assert_eq!(rec.rsi_latest, Some(0.0));
}

#[test]
fn test_pullback_in_uptrend_buys() {
    let mut closes: Vec<f64> = (0..220).map(|i| 100.0 + i as f64).collect();
    closes.push(299.0);
    let rec = evaluate(&closes);
    assert_eq!((rec.buy_signals, rec.sell_signals), (3, 1));
    assert_eq!(rec.verdict, Verdict::Buy);
    assert_eq!(rec.confidence, Confidence::Moderate);
    assert_eq!(rec.rsi_latest, Some(39.39));
    assert_eq!(rec.reasons[1], "RSI moderately low (39.39)");
}

#[test]
fn test_oversold_breakout_buys_with_high_confidence() {
    let rec = evaluate(&breakout());
    assert_eq!((rec.buy_signals, rec.sell_signals), (4, 1));
    assert_eq!(rec.verdict, Verdict::Buy);
    assert_eq!(rec.confidence, Confidence::High);
    assert_eq!(rec.current_price, 35.0);
    assert_eq!(rec.rsi_latest, Some(26.39));
    assert_eq!(
        rec.reasons,
        vec![
            "Strong uptrend: Price above 50-day and 200-day SMA",
            "RSI indicates oversold (26.39)",
            "MACD below signal line (bearish)",
        ]
    );
}

#[test]
fn test_overbought_breakdown_sells_with_high_confidence() {
    let closes: Vec<f64> = breakout().iter().map(|c| 100.0 - c).collect();
    let rec = evaluate(&closes);
    assert_eq!((rec.buy_signals, rec.sell_signals), (1, 4));
    assert_eq!(rec.verdict, Verdict::Sell);
    assert_eq!(rec.confidence, Confidence::High);
    assert_eq!(rec.rsi_latest, Some(73.61));
    assert_eq!(
        rec.reasons[0],
        "Strong downtrend: Price below 50-day and 200-day SMA"
    );
}

#[test]
fn test_volume_surge_adds_reason_only() {
    let mut volumes = vec![1_000.0; 245];
    volumes.extend([5_000.0; 5]);
    let rec = Analyzer::default()
        .evaluate("test", &series_with_volume(&[100.0; 250], &volumes))
        .unwrap();
    assert_eq!((rec.buy_signals, rec.sell_signals), (0, 2));
    assert_eq!(rec.reasons.last().unwrap(), "Above average volume detected");
    assert_eq!(rec.reasons.len(), 3);
}

#[test]
fn test_combination_table() {
    let config = AnalysisConfig::default();

    // (close, short, long) -> expected (buy, sell)
    let trends = [
        ((110.0, 105.0, 100.0), (2, 0)),
        ((90.0, 95.0, 100.0), (0, 2)),
        ((110.0, 105.0, 108.0), (1, 0)),
        ((100.0, 100.0, 100.0), (0, 1)),
    ];
    let rsis = [
        (Some(20.0), (2, 0)),
        (Some(80.0), (0, 2)),
        (Some(40.0), (1, 0)),
        (Some(60.0), (0, 1)),
        (Some(50.0), (0, 0)),
        (None, (0, 0)),
    ];
    let macds = [((1.0, 0.0), (1, 0)), ((0.0, 0.0), (0, 1))];

    for ((close, short, long), (tb, ts)) in trends {
        for (rsi, (rb, rs)) in rsis {
            for ((macd, signal), (mb, ms)) in macds {
                let inputs = ScoreInputs {
                    close,
                    sma_short: Some(short),
                    sma_long: Some(long),
                    rsi,
                    macd,
                    macd_signal: signal,
                    recent_volume: 1.0,
                    average_volume: 1.0,
                };
                let state = score(&inputs, &config);
                let expected = (tb + rb + mb, ts + rs + ms);
                assert_eq!(
                    (state.buy_signals, state.sell_signals),
                    expected,
                    "inputs {:?}",
                    inputs
                );
                assert!((2..=5).contains(&state.total()));

                let (verdict, _) = resolve_verdict(expected.0, expected.1);
                let rec = Analyzer::default().recommend("t", &inputs);
                assert_eq!(rec.verdict, verdict);
            }
        }
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let s = series(&breakout());
    let analyzer = Analyzer::default();
    let first = serde_json::to_string(&analyzer.evaluate("brk", &s).unwrap()).unwrap();
    let second = serde_json::to_string(&analyzer.evaluate("brk", &s).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_latest_values_reproduce_recommendation() {
    let s = series(&breakout());
    let analyzer = Analyzer::default();
    let inputs = analyzer.score_inputs(&s).unwrap();
    assert_eq!(
        analyzer.recommend("BRK", &inputs),
        analyzer.evaluate("BRK", &s).unwrap()
    );
}

#[test]
fn test_recommendation_json_projection() {
    let rec = evaluate(&breakout());
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["ticker"], "TEST");
    assert_eq!(json["verdict"], "BUY");
    assert_eq!(json["confidence"], "High");
    assert_eq!(json["currentPrice"], 35.0);
    assert_eq!(json["rsiLatest"], 26.39);
    assert_eq!(json["buySignals"], 4);
    assert_eq!(json["sellSignals"], 1);
}

#[test]
fn test_tool_returns_same_projection() {
    let source = MemorySource::new().with("BRK", series(&breakout()));
    let analyzer = Analyzer::default();
    let value = invoke_tool(
        &analyzer,
        &source,
        "get_stock_recommendation",
        r#"{"ticker":"brk"}"#,
    )
    .unwrap();
    let direct = analyzer.evaluate("BRK", &series(&breakout())).unwrap();
    assert_eq!(value, serde_json::to_value(direct).unwrap());
}
