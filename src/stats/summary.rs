//! Summary statistics and improvement calculation

use super::types::{SampleSet, StatSummary};
use crate::error::{Error, Result};

/// 1-based nearest rank for `percent`: `floor(n * percent / 100)`, at least 1
fn nearest_rank(n: usize, percent: usize) -> usize {
    (n * percent / 100).max(1)
}

/// Summarize a sample set.
///
/// Percentiles use nearest-rank without interpolation: the 1-based rank is
/// `floor(n * p)` clamped to at least 1. An empty set is an error.
pub fn summarize(samples: &SampleSet) -> Result<StatSummary> {
    if samples.is_empty() {
        return Err(Error::EmptySampleSet);
    }
    if let Some(bad) = samples.as_slice().iter().find(|s| !s.is_finite()) {
        return Err(Error::Other(format!("Non-finite latency sample: {bad}")));
    }

    let mut sorted = samples.as_slice().to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let (min, max) = (sorted[0], sorted[n - 1]);
    // summation rounding can push the mean of equal samples past max
    let mean = (sorted.iter().sum::<f64>() / n as f64).clamp(min, max);

    Ok(StatSummary {
        count: n,
        min,
        max,
        mean,
        p50: sorted[nearest_rank(n, 50) - 1],
        p95: sorted[nearest_rank(n, 95) - 1],
    })
}

/// Relative improvement of `candidate` over `baseline`, in percent.
///
/// Positive means the candidate is smaller (faster or lighter). Returns
/// `None` when the baseline is zero or either value is not finite.
pub fn improvement_percent(baseline: f64, candidate: f64) -> Option<f64> {
    if baseline == 0.0 || !baseline.is_finite() || !candidate.is_finite() {
        return None;
    }
    Some((1.0 - candidate / baseline) * 100.0)
}
