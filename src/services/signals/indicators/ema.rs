//! Exponential Moving Average (EMA) indicator.

use crate::error::{AnalysisError, Result};
use crate::types::{IndicatorSeries, Series};

/// EMA of closing prices.
///
/// Uses `alpha = 2 / (span + 1)` seeded with the first close, so every index
/// is defined. Unlike [`super::sma`] there is no warm-up gap.
pub fn ema(series: &Series, span: usize) -> Result<IndicatorSeries> {
    let values = ema_values(&series.closes(), span)?;
    Ok(IndicatorSeries::from_parts(
        &series.dates(),
        values.into_iter().map(Some).collect(),
    ))
}

/// EMA over raw values.
pub fn ema_values(values: &[f64], span: usize) -> Result<Vec<f64>> {
    if span == 0 {
        return Err(AnalysisError::InvalidParameter(
            "EMA span must be positive".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(AnalysisError::NoData("EMA input is empty".to_string()));
    }

    Ok(smooth_values(values, span_alpha(span)))
}

/// Smoothing factor for a span.
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// The exponential smoothing recurrence shared by EMA, RSI and MACD.
///
/// `out[0] = values[0]`, `out[i] = alpha * values[i] + (1 - alpha) * out[i - 1]`,
/// evaluated as `out[i - 1] + alpha * (values[i] - out[i - 1])` so a constant
/// input stays exactly constant.
pub fn smooth_values(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &value in values {
        let next = match prev {
            Some(p) => (value - p) * alpha + p,
            None => value,
        };
        out.push(next);
        prev = Some(next);
    }

    out
}
