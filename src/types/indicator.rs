use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One indicator reading. `value` is `None` during warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Indicator values aligned one-to-one with the bars of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries {
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Zip dates with values. Both slices must have the same length.
    pub fn from_parts(dates: &[NaiveDate], values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        let points = dates
            .iter()
            .zip(values)
            .map(|(&date, value)| IndicatorPoint { date, value })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of defined (post warm-up) values.
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Value at the last index, if defined.
    pub fn latest(&self) -> Option<f64> {
        self.points.last().and_then(|p| p.value)
    }
}

/// RSI line plus its latest value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiOutput {
    pub latest: Option<f64>,
    pub series: IndicatorSeries,
}

/// MACD, signal and histogram lines with their latest values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub macd_series: IndicatorSeries,
    pub signal_series: IndicatorSeries,
    pub histogram_series: IndicatorSeries,
}

/// Full indicator set for one ticker, for charting collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReport {
    pub ticker: String,
    pub window: usize,
    pub closes: IndicatorSeries,
    pub sma: IndicatorSeries,
    pub ema: IndicatorSeries,
    pub rsi: RsiOutput,
    pub macd: MacdOutput,
}
