use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// One day's OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// All prices and the volume are finite, and the volume is not negative.
    pub fn is_well_formed(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
            && self.volume >= 0.0
    }
}

/// Daily bars for one instrument, strictly ascending by date.
///
/// Only constructible through [`Series::new`]. Every `Series` is non-empty
/// and strictly ascending, and every bar in it is well formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Validate and wrap a list of bars.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(AnalysisError::NoData("series has no bars".to_string()));
        }

        if let Some(bar) = bars.iter().find(|b| !b.is_well_formed()) {
            return Err(AnalysisError::InvalidSeries(format!(
                "bar on {} has a non-finite field or negative volume",
                bar.date
            )));
        }

        if let Some(pair) = bars.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(AnalysisError::InvalidSeries(format!(
                "dates must be strictly ascending: {} followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Bars dated within `days` calendar days of the latest bar, inclusive.
    pub fn trailing_days(&self, days: u32) -> Series {
        let cutoff = self.latest().date - Duration::days(i64::from(days));
        let start = self.bars.partition_point(|b| b.date < cutoff);
        Series {
            bars: self.bars[start..].to_vec(),
        }
    }

    /// The most recent bar.
    pub fn latest(&self) -> &Bar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<Bar>::deserialize(deserializer)?;
        Series::new(bars).map_err(serde::de::Error::custom)
    }
}
