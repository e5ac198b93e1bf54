//! Volume averages used by the volume rule.

use crate::types::Series;

/// Mean volume over the last `bars` bars, or over the whole series when it is
/// shorter than that.
pub fn recent_mean_volume(series: &Series, bars: usize) -> f64 {
    let volumes = series.volumes();
    let tail = &volumes[volumes.len().saturating_sub(bars.max(1))..];
    mean(tail)
}

/// Mean volume over the whole series.
pub fn mean_volume(series: &Series) -> f64 {
    mean(&series.volumes())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
