//! Augur - technical indicator and buy/sell/hold recommendation engine

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use std::sync::Arc;

use config::Config;
use services::bar_source::BarSource;
use services::signals::Analyzer;

pub use error::{AnalysisError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<Analyzer>,
    pub source: Arc<dyn BarSource>,
}
