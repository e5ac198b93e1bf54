//! Rule-based signal scoring.
//!
//! Four rules run in a fixed order over the latest indicator values. The
//! order of `reasons` is the order in which rules fire.

use serde::Serialize;

use crate::config::AnalysisConfig;

/// Latest indicator readings the rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInputs {
    pub close: f64,
    /// Short-window SMA, `None` when the series is shorter than the window.
    pub sma_short: Option<f64>,
    /// Long-window SMA, `None` when the series is shorter than the window.
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub recent_volume: f64,
    pub average_volume: f64,
}

/// Signal counters and reasons for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub buy_signals: u32,
    pub sell_signals: u32,
    pub reasons: Vec<String>,
}

impl ScoreState {
    fn buy(&mut self, weight: u32, reason: String) {
        self.buy_signals += weight;
        self.reasons.push(reason);
    }

    fn sell(&mut self, weight: u32, reason: String) {
        self.sell_signals += weight;
        self.reasons.push(reason);
    }

    fn note(&mut self, reason: String) {
        self.reasons.push(reason);
    }

    pub fn total(&self) -> u32 {
        self.buy_signals + self.sell_signals
    }
}

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_LEAN_LOW: f64 = 45.0;
pub const RSI_LEAN_HIGH: f64 = 55.0;

/// Apply every rule in order.
pub fn score(inputs: &ScoreInputs, config: &AnalysisConfig) -> ScoreState {
    let mut state = ScoreState::default();

    trend_rule(&mut state, inputs, config);
    rsi_rule(&mut state, inputs.rsi);
    macd_rule(&mut state, inputs.macd, inputs.macd_signal);
    volume_rule(
        &mut state,
        inputs.recent_volume,
        inputs.average_volume,
        config.volume_surge_ratio,
    );

    state
}

/// `value > reference`, false when the reference is undefined.
fn above(value: f64, reference: Option<f64>) -> bool {
    reference.is_some_and(|r| value > r)
}

/// `value < reference`, false when the reference is undefined.
fn below(value: f64, reference: Option<f64>) -> bool {
    reference.is_some_and(|r| value < r)
}

/// Exactly one branch fires.
fn trend_rule(state: &mut ScoreState, inputs: &ScoreInputs, config: &AnalysisConfig) {
    let short = config.sma_short_window;
    let long = config.sma_long_window;
    let close = inputs.close;

    let stacked_up = above(close, inputs.sma_short)
        && inputs.sma_short.is_some_and(|s| above(s, inputs.sma_long));
    let stacked_down = below(close, inputs.sma_short)
        && inputs.sma_short.is_some_and(|s| below(s, inputs.sma_long));

    if stacked_up {
        state.buy(
            2,
            format!(
                "Strong uptrend: Price above {}-day and {}-day SMA",
                short, long
            ),
        );
    } else if stacked_down {
        state.sell(
            2,
            format!(
                "Strong downtrend: Price below {}-day and {}-day SMA",
                short, long
            ),
        );
    } else if above(close, inputs.sma_short) {
        state.buy(1, format!("Price above {}-day SMA", short));
    } else {
        state.sell(1, format!("Price below {}-day SMA", short));
    }
}

/// RSI in `[45, 55]` is a dead zone: no count and no reason.
fn rsi_rule(state: &mut ScoreState, rsi: Option<f64>) {
    let Some(rsi) = rsi else {
        return;
    };

    if rsi < RSI_OVERSOLD {
        state.buy(2, format!("RSI indicates oversold ({:.2})", rsi));
    } else if rsi > RSI_OVERBOUGHT {
        state.sell(2, format!("RSI indicates overbought ({:.2})", rsi));
    } else if rsi < RSI_LEAN_LOW {
        state.buy(1, format!("RSI moderately low ({:.2})", rsi));
    } else if rsi > RSI_LEAN_HIGH {
        state.sell(1, format!("RSI moderately high ({:.2})", rsi));
    }
}

/// Always fires. A tie counts as bearish.
fn macd_rule(state: &mut ScoreState, macd: f64, signal: f64) {
    if macd > signal {
        state.buy(1, "MACD above signal line (bullish)".to_string());
    } else {
        state.sell(1, "MACD below signal line (bearish)".to_string());
    }
}

/// Informational only, never touches the counters.
fn volume_rule(state: &mut ScoreState, recent: f64, average: f64, surge_ratio: f64) {
    if recent > average * surge_ratio {
        state.note("Above average volume detected".to_string());
    }
}
