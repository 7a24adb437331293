//! Measurement types

use serde::{Deserialize, Serialize};

/// Latency samples, in milliseconds, for one endpoint's sampling run.
///
/// Samples can only be appended; the set is read once by [`summarize`](super::summarize).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<f64>,
}

impl SampleSet {
    /// Create an empty sample set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sample set with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Record one latency sample
    pub fn push(&mut self, millis: f64) {
        self.samples.push(millis);
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no sample has been recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in recording order
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }
}

impl From<Vec<f64>> for SampleSet {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

impl FromIterator<f64> for SampleSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Summary statistics of a sample set, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    /// Number of samples summarized
    pub count: usize,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Nearest-rank median
    pub p50: f64,
    /// Nearest-rank 95th percentile
    pub p95: f64,
}

/// Outcome of walking one endpoint's pagination to exhaustion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Items summed over every page
    pub total_items: u64,
    /// Pages requested
    pub page_count: u64,
    /// Wall-clock time for the whole traversal
    pub elapsed_seconds: f64,
}
