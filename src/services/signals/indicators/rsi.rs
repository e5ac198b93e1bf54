//! Relative Strength Index (RSI) indicator.

use super::ema::smooth_values;
use crate::error::{AnalysisError, Result};
use crate::types::{IndicatorSeries, RsiOutput, Series};

/// Standard Wilder lookback.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI reported when both average gain and average loss are zero.
///
/// A flat price run has no momentum either way, so it maps to the midpoint.
pub const FLAT_RSI: f64 = 50.0;

/// RSI of closing prices.
///
/// Gains and losses are smoothed with Wilder's factor `1 / period`, each
/// seeded at its first defined value. Index 0 has no price change and is
/// undefined; every later index is defined and lies in `[0, 100]`.
pub fn rsi(series: &Series, period: usize) -> Result<RsiOutput> {
    let values = rsi_values(&series.closes(), period)?;
    let series = IndicatorSeries::from_parts(&series.dates(), values);

    Ok(RsiOutput {
        latest: series.latest(),
        series,
    })
}

/// RSI over raw closes, same length as the input.
pub fn rsi_values(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    if period == 0 {
        return Err(AnalysisError::InvalidParameter(
            "RSI period must be positive".to_string(),
        ));
    }
    if closes.is_empty() {
        return Err(AnalysisError::NoData("RSI input is empty".to_string()));
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let alpha = 1.0 / period as f64;
    let avg_gains = smooth_values(&gains, alpha);
    let avg_losses = smooth_values(&losses, alpha);

    let mut out = Vec::with_capacity(closes.len());
    out.push(None);
    out.extend(
        avg_gains
            .iter()
            .zip(&avg_losses)
            .map(|(&gain, &loss)| Some(rsi_from_averages(gain, loss))),
    );

    Ok(out)
}

/// RSI from smoothed average gain and loss.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { FLAT_RSI };
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
