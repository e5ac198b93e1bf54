use serde::{Deserialize, Serialize};

/// Discrete trading verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Buy,
    Sell,
    Hold,
}

impl Verdict {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Buy => "BUY",
            Verdict::Sell => "SELL",
            Verdict::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative strength attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Moderate,
    Neutral,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Moderate => "Moderate",
            Confidence::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Final buy/sell/hold result for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Ticker symbol, upper case.
    pub ticker: String,
    pub verdict: Verdict,
    pub confidence: Confidence,
    /// Last close, rounded to cents.
    pub current_price: f64,
    /// Latest RSI rounded to two decimals. `None` for a single-bar series.
    pub rsi_latest: Option<f64>,
    pub buy_signals: u32,
    pub sell_signals: u32,
    /// Reasons in rule firing order.
    pub reasons: Vec<String>,
}
