//! Simple Moving Average (SMA) indicator.

use crate::error::{AnalysisError, Result};
use crate::types::{IndicatorSeries, Series};

/// SMA of closing prices.
///
/// Each value is the mean of the trailing `window` closes ending at that
/// index. The first `window - 1` entries are undefined.
pub fn sma(series: &Series, window: usize) -> Result<IndicatorSeries> {
    let values = sma_values(&series.closes(), window)?;
    Ok(IndicatorSeries::from_parts(&series.dates(), values))
}

/// SMA over raw values, same length as the input.
pub fn sma_values(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(AnalysisError::InvalidParameter(
            "SMA window must be positive".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(AnalysisError::NoData("SMA input is empty".to_string()));
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = RunningSum::default();

    for (i, &value) in values.iter().enumerate() {
        sum.add(value);
        if i >= window {
            sum.add(-values[i - window]);
        }
        out.push((i + 1 >= window).then(|| sum.value() / window as f64));
    }

    Ok(out)
}

/// Kahan-compensated sum, so sliding the window does not accumulate drift.
#[derive(Debug, Default)]
struct RunningSum {
    sum: f64,
    compensation: f64,
}

impl RunningSum {
    fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum
    }
}

/// Latest SMA value, or `None` when the series is shorter than the window.
pub fn latest_sma(series: &Series, window: usize) -> Result<Option<f64>> {
    Ok(sma(series, window)?.latest())
}
