//! Sources of daily bar history.
//!
//! Fetching from a market-data provider happens outside this crate; a
//! provider hands over a validated [`Series`] through the [`BarSource`] trait.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::config::DEFAULT_LOOKBACK_DAYS;
use crate::error::{AnalysisError, Result};
use crate::types::{Bar, Series};

/// Anything that can produce the bar history for a ticker.
pub trait BarSource: Send + Sync {
    /// Daily bars for `ticker`, oldest first.
    ///
    /// Must fail with [`AnalysisError::NoData`] for unknown tickers.
    fn history(&self, ticker: &str) -> Result<Series>;

    /// Last close for `ticker`.
    fn latest_price(&self, ticker: &str) -> Result<f64> {
        Ok(self.history(ticker)?.latest().close)
    }
}

/// Normalize a ticker symbol for lookups (e.g. "aapl " -> "AAPL").
pub fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(AnalysisError::InvalidParameter(
            "ticker must not be empty".to_string(),
        ));
    }
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(AnalysisError::InvalidParameter(format!(
            "ticker contains invalid characters: {}",
            ticker
        )));
    }
    Ok(ticker)
}

/// In-memory source keyed by upper-case ticker.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<String, Series>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a ticker's history.
    pub fn insert(&mut self, ticker: &str, series: Series) {
        self.series.insert(ticker.trim().to_uppercase(), series);
    }

    pub fn with(mut self, ticker: &str, series: Series) -> Self {
        self.insert(ticker, series);
        self
    }
}

impl BarSource for MemorySource {
    fn history(&self, ticker: &str) -> Result<Series> {
        let key = normalize_ticker(ticker)?;
        self.series
            .get(&key)
            .cloned()
            .ok_or_else(|| AnalysisError::NoData(format!("no history for {}", key)))
    }
}

/// Reads `<dir>/<TICKER>.json`, each file a JSON array of bars.
///
/// Only the trailing `lookback_days` of a file are returned, so a file
/// holding several years evaluates the same as one holding a single year.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
    lookback_days: u32,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Set the trailing window in calendar days. Zero keeps every bar.
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.json", ticker))
    }
}

impl BarSource for JsonFileSource {
    fn history(&self, ticker: &str) -> Result<Series> {
        let key = normalize_ticker(ticker)?;
        let path = self.path_for(&key);

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No bar file at {}", path.display());
                return Err(AnalysisError::NoData(format!("no history for {}", key)));
            }
            Err(e) => return Err(e.into()),
        };

        let bars: Vec<Bar> = serde_json::from_str(&raw)?;
        if bars.is_empty() {
            return Err(AnalysisError::NoData(format!("empty history for {}", key)));
        }

        let loaded = bars.len();
        let series = Series::new(bars)?;
        let series = if self.lookback_days == 0 {
            series
        } else {
            series.trailing_days(self.lookback_days)
        };

        debug!(
            "Loaded {} of {} bars for {} from {}",
            series.len(),
            loaded,
            key,
            path.display()
        );
        Ok(series)
    }
}
