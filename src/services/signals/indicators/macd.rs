//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::ema_values;
use crate::error::{AnalysisError, Result};
use crate::types::{IndicatorSeries, MacdOutput, Series};

/// MACD spans.
///
/// - MACD Line = EMA(fast) - EMA(slow)
/// - Signal Line = EMA(signal) of MACD Line
/// - Histogram = MACD Line - Signal Line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<()> {
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            return Err(AnalysisError::InvalidParameter(
                "MACD spans must be positive".to_string(),
            ));
        }
        if self.fast >= self.slow {
            return Err(AnalysisError::InvalidParameter(format!(
                "MACD fast span {} must be shorter than slow span {}",
                self.fast, self.slow
            )));
        }
        Ok(())
    }
}

/// MACD of closing prices. All three lines are defined at every index.
pub fn macd(series: &Series, params: MacdParams) -> Result<MacdOutput> {
    params.validate()?;

    let closes = series.closes();
    let fast = ema_values(&closes, params.fast)?;
    let slow = ema_values(&closes, params.slow)?;

    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema_values(&macd_line, params.signal)?;
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    // Non-empty: the series has at least one bar.
    let last = macd_line.len() - 1;
    let dates = series.dates();
    let defined = |values: &[f64]| {
        IndicatorSeries::from_parts(&dates, values.iter().copied().map(Some).collect())
    };

    Ok(MacdOutput {
        macd: macd_line[last],
        signal: signal_line[last],
        histogram: histogram[last],
        macd_series: defined(&macd_line),
        signal_series: defined(&signal_line),
        histogram_series: defined(&histogram),
    })
}
