//! End-to-end evaluation of a ticker.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::indicators::{
    ema, latest_sma, macd, mean_volume, recent_mean_volume, rsi, sma,
};
use super::recommendation::build_recommendation;
use super::scorer::{score, ScoreInputs};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::services::bar_source::{normalize_ticker, BarSource};
use crate::types::{IndicatorReport, IndicatorSeries, Recommendation, Series};

/// Runs indicators, scoring and verdict resolution with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer, rejecting invalid windows up front.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute the latest indicator values the rules need.
    pub fn score_inputs(&self, series: &Series) -> Result<ScoreInputs> {
        let sma_short = latest_sma(series, self.config.sma_short_window)?;
        let sma_long = latest_sma(series, self.config.sma_long_window)?;
        let rsi = rsi(series, self.config.rsi_period)?;
        let macd = macd(series, self.config.macd)?;

        Ok(ScoreInputs {
            close: series.latest().close,
            sma_short,
            sma_long,
            rsi: rsi.latest,
            macd: macd.macd,
            macd_signal: macd.signal,
            recent_volume: recent_mean_volume(series, self.config.volume_recent_bars),
            average_volume: mean_volume(series),
        })
    }

    /// Score precomputed inputs and package the result.
    pub fn recommend(&self, ticker: &str, inputs: &ScoreInputs) -> Recommendation {
        let state = score(inputs, &self.config);
        build_recommendation(ticker, inputs.close, inputs.rsi, state)
    }

    /// Evaluate a series. Any indicator failure aborts the evaluation.
    pub fn evaluate(&self, ticker: &str, series: &Series) -> Result<Recommendation> {
        let ticker = normalize_ticker(ticker)?;
        let inputs = self.score_inputs(series)?;
        let recommendation = self.recommend(&ticker, &inputs);

        debug!(
            "{} -> {} ({}) buy={} sell={} over {} bars",
            recommendation.ticker,
            recommendation.verdict,
            recommendation.confidence,
            recommendation.buy_signals,
            recommendation.sell_signals,
            series.len()
        );

        Ok(recommendation)
    }

    /// Load a ticker's history and evaluate it.
    pub fn evaluate_ticker(&self, source: &dyn BarSource, ticker: &str) -> Result<Recommendation> {
        let series = source.history(ticker)?;
        self.evaluate(ticker, &series)
    }

    /// Full indicator lines for charting. `window` applies to SMA and EMA.
    pub fn indicator_report(
        &self,
        ticker: &str,
        series: &Series,
        window: usize,
    ) -> Result<IndicatorReport> {
        let closes = IndicatorSeries::from_parts(
            &series.dates(),
            series.closes().into_iter().map(Some).collect(),
        );

        Ok(IndicatorReport {
            ticker: normalize_ticker(ticker)?,
            window,
            closes,
            sma: sma(series, window)?,
            ema: ema(series, window)?,
            rsi: rsi(series, self.config.rsi_period)?,
            macd: macd(series, self.config.macd)?,
        })
    }

    /// Evaluate several tickers concurrently, one blocking task each.
    ///
    /// Results come back in input order; one ticker failing does not affect
    /// the others.
    pub async fn evaluate_many(
        &self,
        source: Arc<dyn BarSource>,
        tickers: &[String],
    ) -> Vec<(String, Result<Recommendation>)> {
        let mut tasks = JoinSet::new();

        for (index, ticker) in tickers.iter().enumerate() {
            let analyzer = self.clone();
            let source = source.clone();
            let ticker = ticker.clone();
            tasks.spawn_blocking(move || {
                let result = analyzer.evaluate_ticker(source.as_ref(), &ticker);
                (index, ticker, result)
            });
        }

        let mut results: Vec<Option<(String, Result<Recommendation>)>> =
            (0..tickers.len()).map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, ticker, result)) => {
                    if let Err(e) = &result {
                        warn!("Evaluation failed for {}: {}", ticker, e);
                    }
                    results[index] = Some((ticker, result));
                }
                Err(e) => warn!("Evaluation task aborted: {}", e),
            }
        }

        results
            .into_iter()
            .zip(tickers)
            .map(|(slot, ticker)| {
                slot.unwrap_or_else(|| {
                    (
                        ticker.clone(),
                        Err(AnalysisError::TaskFailed(format!(
                            "evaluation of {} did not complete",
                            ticker
                        ))),
                    )
                })
            })
            .collect()
    }
}
