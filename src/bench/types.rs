//! Benchmark result types

use crate::config::EndpointSpec;
use crate::stats::{StatSummary, TraversalResult};
use serde::Serialize;

/// Every measurement collected for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointResult {
    /// Slot identifier ("A", "B" or "C")
    pub id: String,
    /// Display name
    pub name: String,
    /// Path relative to the base URL
    pub path: String,
    /// Latency summary of the sampling phase
    pub latency: StatSummary,
    /// Body size of the unpaginated request, in bytes
    pub size_bytes: u64,
    /// Full traversal outcome
    pub traversal: TraversalResult,
}

impl EndpointResult {
    /// Assemble a result for `endpoint`
    pub fn new(
        endpoint: &EndpointSpec,
        latency: StatSummary,
        size_bytes: u64,
        traversal: TraversalResult,
    ) -> Self {
        Self {
            id: endpoint.id.clone(),
            name: endpoint.name.clone(),
            path: endpoint.path.clone(),
            latency,
            size_bytes,
            traversal,
        }
    }
}
