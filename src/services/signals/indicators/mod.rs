//! Technical indicator implementations.
//!
//! Every function is pure over its input series and returns values aligned
//! by position with the source bars.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use ema::{ema, ema_values, smooth_values, span_alpha};
pub use macd::{macd, MacdParams};
pub use rsi::{rsi, rsi_from_averages, rsi_values, DEFAULT_RSI_PERIOD, FLAT_RSI};
pub use sma::{latest_sma, sma, sma_values};
pub use volume::{mean_volume, recent_mean_volume};
