//! Trading signals service module.
//!
//! Provides technical indicator calculations, rule-based scoring and
//! buy/sell/hold resolution.

pub mod analyzer;
pub mod indicators;
pub mod recommendation;
pub mod scorer;

pub use analyzer::Analyzer;
pub use recommendation::{build_recommendation, resolve_verdict};
pub use scorer::{score, ScoreInputs, ScoreState};
