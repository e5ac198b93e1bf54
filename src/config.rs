use std::env;
use std::path::PathBuf;

use crate::error::{AnalysisError, Result};
use crate::services::signals::indicators::{MacdParams, DEFAULT_RSI_PERIOD};

/// Indicator windows and scoring thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Short trend SMA window (default: 50).
    pub sma_short_window: usize,
    /// Long trend SMA window (default: 200).
    pub sma_long_window: usize,
    /// RSI lookback (default: 14).
    pub rsi_period: usize,
    /// MACD spans (default: 12/26/9).
    pub macd: MacdParams,
    /// Bars in the "recent" volume mean (default: 5).
    pub volume_recent_bars: usize,
    /// Recent/overall volume ratio above which volume is noted (default: 1.2).
    pub volume_surge_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_short_window: 50,
            sma_long_window: 200,
            rsi_period: DEFAULT_RSI_PERIOD,
            macd: MacdParams::default(),
            volume_recent_bars: 5,
            volume_surge_ratio: 1.2,
        }
    }
}

impl AnalysisConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            sma_short_window: env_parse("SMA_SHORT_WINDOW").unwrap_or(defaults.sma_short_window),
            sma_long_window: env_parse("SMA_LONG_WINDOW").unwrap_or(defaults.sma_long_window),
            rsi_period: env_parse("RSI_PERIOD").unwrap_or(defaults.rsi_period),
            macd: MacdParams {
                fast: env_parse("MACD_FAST").unwrap_or(defaults.macd.fast),
                slow: env_parse("MACD_SLOW").unwrap_or(defaults.macd.slow),
                signal: env_parse("MACD_SIGNAL").unwrap_or(defaults.macd.signal),
            },
            volume_recent_bars: env_parse("VOLUME_RECENT_BARS")
                .unwrap_or(defaults.volume_recent_bars),
            volume_surge_ratio: env_parse("VOLUME_SURGE_RATIO")
                .unwrap_or(defaults.volume_surge_ratio),
        }
    }

    /// Reject zero windows and inverted window pairs.
    pub fn validate(&self) -> Result<()> {
        if self.sma_short_window == 0 || self.sma_long_window == 0 {
            return Err(AnalysisError::InvalidParameter(
                "SMA windows must be positive".to_string(),
            ));
        }
        if self.sma_short_window >= self.sma_long_window {
            return Err(AnalysisError::InvalidParameter(format!(
                "short SMA window {} must be below long window {}",
                self.sma_short_window, self.sma_long_window
            )));
        }
        if self.rsi_period == 0 {
            return Err(AnalysisError::InvalidParameter(
                "RSI period must be positive".to_string(),
            ));
        }
        if self.volume_recent_bars == 0 {
            return Err(AnalysisError::InvalidParameter(
                "recent volume bar count must be positive".to_string(),
            ));
        }
        if self.volume_surge_ratio.is_nan() || self.volume_surge_ratio <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "volume surge ratio must be positive, got {}",
                self.volume_surge_ratio
            )));
        }
        self.macd.validate()
    }
}

/// One trailing year of daily bars.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Directory holding `<TICKER>.json` bar files.
    pub data_dir: PathBuf,
    /// Calendar days of history evaluated, counted back from the latest bar
    /// (default: 365). Zero keeps the whole file.
    pub lookback_days: u32,
    /// Indicator and scoring settings.
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse("PORT").unwrap_or(3001),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            lookback_days: env_parse("LOOKBACK_DAYS").unwrap_or(DEFAULT_LOOKBACK_DAYS),
            analysis: AnalysisConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
