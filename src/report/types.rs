//! Report types

use crate::bench::EndpointResult;
use crate::config::BenchConfig;
use crate::stats::improvement_percent;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Relative improvement of one endpoint over another.
///
/// Percentages are positive when the candidate is faster or smaller, and
/// `None` when the baseline value is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Baseline endpoint id
    pub baseline: String,
    /// Candidate endpoint id
    pub candidate: String,
    /// Improvement of mean latency
    pub latency: Option<f64>,
    /// Improvement of response size
    pub size: Option<f64>,
    /// Improvement of full traversal time
    pub traversal: Option<f64>,
}

impl Comparison {
    /// Compare `candidate` against `baseline`
    pub fn between(baseline: &EndpointResult, candidate: &EndpointResult) -> Self {
        Self {
            baseline: baseline.id.clone(),
            candidate: candidate.id.clone(),
            latency: improvement_percent(baseline.latency.mean, candidate.latency.mean),
            size: improvement_percent(baseline.size_bytes as f64, candidate.size_bytes as f64),
            traversal: improvement_percent(
                baseline.traversal.elapsed_seconds,
                candidate.traversal.elapsed_seconds,
            ),
        }
    }
}

/// Complete output of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Target server
    pub base_url: String,
    /// Items per full page
    pub page_size: u64,
    /// Unmeasured requests per endpoint
    pub warmup_requests: u32,
    /// Measured requests per endpoint
    pub benchmark_requests: u32,
    /// Results in endpoint order
    pub endpoints: Vec<EndpointResult>,
    /// Every earlier endpoint compared against every later one
    pub comparisons: Vec<Comparison>,
}

impl BenchmarkReport {
    /// Build a report stamped with the current time
    pub fn new(config: &BenchConfig, endpoints: Vec<EndpointResult>) -> Self {
        Self::at(Utc::now(), config, endpoints)
    }

    /// Build a report with an explicit timestamp
    pub fn at(
        generated_at: DateTime<Utc>,
        config: &BenchConfig,
        endpoints: Vec<EndpointResult>,
    ) -> Self {
        let mut comparisons = Vec::new();
        for (i, baseline) in endpoints.iter().enumerate() {
            for candidate in &endpoints[i + 1..] {
                comparisons.push(Comparison::between(baseline, candidate));
            }
        }

        Self {
            generated_at,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
            warmup_requests: config.warmup_requests,
            benchmark_requests: config.benchmark_requests,
            endpoints,
            comparisons,
        }
    }

    /// Display name for an endpoint id
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.endpoints
            .iter()
            .find(|e| e.id == id)
            .map_or(id, |e| e.name.as_str())
    }
}
