//! Statistics module
//!
//! Latency summaries over a [`SampleSet`] and relative improvement between
//! a baseline and a candidate measurement.

mod summary;
mod types;

pub use summary::{improvement_percent, summarize};
pub use types::{SampleSet, StatSummary, TraversalResult};
