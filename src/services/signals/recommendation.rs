//! Resolve signal counts into a verdict.

use super::scorer::ScoreState;
use crate::types::{Confidence, Recommendation, Verdict};

/// Signal count at which a verdict is reported with high confidence.
pub const HIGH_CONFIDENCE_SIGNALS: u32 = 4;

/// Verdict needs a lead of at least two signals; anything closer holds.
pub fn resolve_verdict(buy_signals: u32, sell_signals: u32) -> (Verdict, Confidence) {
    let strength = |count: u32| {
        if count >= HIGH_CONFIDENCE_SIGNALS {
            Confidence::High
        } else {
            Confidence::Moderate
        }
    };

    if buy_signals > sell_signals + 1 {
        (Verdict::Buy, strength(buy_signals))
    } else if sell_signals > buy_signals + 1 {
        (Verdict::Sell, strength(sell_signals))
    } else {
        (Verdict::Hold, Confidence::Neutral)
    }
}

/// Package a finished score into a [`Recommendation`]. The ticker is echoed
/// as given.
pub fn build_recommendation(
    ticker: &str,
    current_price: f64,
    rsi: Option<f64>,
    state: ScoreState,
) -> Recommendation {
    let (verdict, confidence) = resolve_verdict(state.buy_signals, state.sell_signals);

    Recommendation {
        ticker: ticker.to_string(),
        verdict,
        confidence,
        current_price: round2(current_price),
        rsi_latest: rsi.map(round2),
        buy_signals: state.buy_signals,
        sell_signals: state.sell_signals,
        reasons: state.reasons,
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
