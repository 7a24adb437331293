//! Benchmark driver module
//!
//! Runs the measurement phases against each configured endpoint.
//!
//! # Overview
//!
//! For every endpoint the driver runs, in order:
//! - **warmup** - unmeasured requests against the base path
//! - **sampling** - measured page requests, cycling through the pages
//! - **size** - body size of one unpaginated request
//! - **traversal** - every page from the first to the last, timed as a whole
//!
//! Before any phase a liveness probe is sent to the second endpoint.
//! Endpoints run one after another unless parallel mode is enabled; pages of
//! a single endpoint are always requested in pagination order.

mod types;

pub use types::EndpointResult;

use crate::config::{BenchConfig, EndpointSpec};
use crate::error::{Error, Phase, Result};
use crate::http::{compose_url, HttpClient, HttpClientConfig, HttpResponse, Requester};
use crate::pagination::{NextPage, PaginationState, Paginator};
use crate::query::{DocumentQuery, JsonPathQuery};
use crate::stats::{summarize, SampleSet, TraversalResult};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Drives the measurement phases
pub struct BenchmarkDriver {
    /// HTTP requester
    requester: Box<dyn Requester>,
    /// Field extractor
    query: Box<dyn DocumentQuery>,
    /// Target server
    base_url: String,
    /// Items per full page
    page_size: u64,
}

impl BenchmarkDriver {
    /// Create a driver using the built-in JSONPath engine
    pub fn new(requester: Box<dyn Requester>, base_url: impl Into<String>, page_size: u64) -> Self {
        Self {
            requester,
            query: Box::new(JsonPathQuery::new()),
            base_url: base_url.into(),
            page_size,
        }
    }

    /// Create a driver backed by a real HTTP client
    pub fn from_config(config: &BenchConfig) -> Result<Self> {
        let mut http = HttpClientConfig::builder();
        if let Some(timeout) = config.request_timeout() {
            http = http.timeout(timeout);
        }
        let client = HttpClient::with_config(http.build())?;

        Ok(Self::new(
            Box::new(client),
            config.base_url.clone(),
            config.page_size,
        ))
    }

    /// Replace the query engine
    #[must_use]
    pub fn with_query(mut self, query: Box<dyn DocumentQuery>) -> Self {
        self.query = query;
        self
    }

    /// Run every phase for every endpoint, after a liveness probe
    pub async fn run(&self, config: &BenchConfig) -> Result<Vec<EndpointResult>> {
        if let Some(endpoint) = config.probe_endpoint() {
            self.probe(endpoint)
                .await
                .map_err(|e| e.in_phase(Phase::Probe, &endpoint.name))?;
        }

        let warmup = config.warmup_requests;
        let samples = config.benchmark_requests;

        if config.parallel {
            info!("Benchmarking {} endpoints concurrently", config.endpoints.len());
            futures::future::try_join_all(
                config
                    .endpoints
                    .iter()
                    .map(|endpoint| self.run_endpoint(endpoint, warmup, samples)),
            )
            .await
        } else {
            let mut results = Vec::with_capacity(config.endpoints.len());
            for endpoint in &config.endpoints {
                results.push(self.run_endpoint(endpoint, warmup, samples).await?);
            }
            Ok(results)
        }
    }

    /// Run every phase for one endpoint
    pub async fn run_endpoint(
        &self,
        endpoint: &EndpointSpec,
        warmup_requests: u32,
        benchmark_requests: u32,
    ) -> Result<EndpointResult> {
        let name = endpoint.name.as_str();

        info!("[{}] warming up with {} requests", name, warmup_requests);
        self.warmup(endpoint, warmup_requests)
            .await
            .map_err(|e| e.in_phase(Phase::Warmup, name))?;

        info!("[{}] sampling {} requests", name, benchmark_requests);
        let latency = self
            .sample_latency(endpoint, benchmark_requests)
            .await
            .and_then(|samples| summarize(&samples))
            .map_err(|e| e.in_phase(Phase::Sampling, name))?;

        let size_bytes = self
            .measure_size(endpoint)
            .await
            .map_err(|e| e.in_phase(Phase::Size, name))?;

        info!("[{}] traversing all pages", name);
        let traversal = self
            .traverse(endpoint)
            .await
            .map_err(|e| e.in_phase(Phase::Traversal, name))?;

        info!(
            "[{}] avg {:.2}ms, {} bytes, {} items over {} pages in {:.3}s",
            name,
            latency.mean,
            size_bytes,
            traversal.total_items,
            traversal.page_count,
            traversal.elapsed_seconds
        );

        Ok(EndpointResult::new(endpoint, latency, size_bytes, traversal))
    }

    /// Check that the endpoint answers at all. Any HTTP status counts as alive.
    pub async fn probe(&self, endpoint: &EndpointSpec) -> Result<()> {
        let url = self.base_path_url(endpoint)?;
        match self.requester.get(&url).await {
            Ok(response) => {
                debug!("Liveness probe {} -> {}", url, response.status);
                Ok(())
            }
            Err(e) => Err(Error::liveness(url.as_str(), e.to_string())),
        }
    }

    /// Issue `n` unmeasured requests against the base path, ignoring outcomes
    pub async fn warmup(&self, endpoint: &EndpointSpec, n: u32) -> Result<()> {
        let url = self.base_path_url(endpoint)?;
        for i in 0..n {
            match self.requester.get(&url).await {
                Ok(response) => debug!("Warmup {}/{} -> {}", i + 1, n, response.status),
                Err(e) => debug!("Warmup {}/{} failed: {}", i + 1, n, e),
            }
        }
        Ok(())
    }

    /// Collect exactly `n` page latencies, restarting at the first page
    /// whenever pagination is exhausted
    pub async fn sample_latency(&self, endpoint: &EndpointSpec, n: u32) -> Result<SampleSet> {
        let paginator = endpoint.pagination.build(self.page_size);
        let mut samples = SampleSet::with_capacity(n as usize);
        let mut state = paginator.initial_state();

        while samples.len() < n as usize {
            let (response, document) = self.fetch_page(endpoint, paginator.as_ref(), &state).await?;
            samples.push(response.elapsed_ms());

            let outcome = paginator.process_page(&document, state, self.query.as_ref())?;
            state = match outcome.next {
                NextPage::Continue(next) => next,
                NextPage::Done => {
                    debug!("[{}] last page reached, restarting sampling", endpoint.name);
                    paginator.initial_state()
                }
            };
        }

        Ok(samples)
    }

    /// Body size in bytes of one request to the base path
    pub async fn measure_size(&self, endpoint: &EndpointSpec) -> Result<u64> {
        let url = self.base_path_url(endpoint)?;
        let response = self.requester.get(&url).await?;
        ensure_success(&response, &url)?;
        Ok(response.size() as u64)
    }

    /// Walk pagination from the first page to the last
    pub async fn traverse(&self, endpoint: &EndpointSpec) -> Result<TraversalResult> {
        let paginator = endpoint.pagination.build(self.page_size);
        let mut state = paginator.initial_state();
        let mut requested = HashSet::new();
        let mut total_items = 0u64;
        let mut page_count = 0u64;

        let started = Instant::now();
        loop {
            requested.insert(state.clone());
            let (_, document) = self.fetch_page(endpoint, paginator.as_ref(), &state).await?;

            let outcome = paginator.process_page(&document, state, self.query.as_ref())?;
            total_items += outcome.items;
            page_count += 1;

            match outcome.next {
                NextPage::Continue(next) if requested.contains(&next) => {
                    warn!(
                        "[{}] pagination returned to {} which was already requested, stopping",
                        endpoint.name, next
                    );
                    break;
                }
                NextPage::Continue(next) => state = next,
                NextPage::Done => break,
            }
        }

        Ok(TraversalResult {
            total_items,
            page_count,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }

    fn base_path_url(&self, endpoint: &EndpointSpec) -> Result<Url> {
        compose_url(&self.base_url, &endpoint.path, &[])
    }

    async fn fetch_page(
        &self,
        endpoint: &EndpointSpec,
        paginator: &dyn Paginator,
        state: &PaginationState,
    ) -> Result<(HttpResponse, Value)> {
        let params = paginator.page_params(state)?;
        let pairs: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let url = compose_url(&self.base_url, &endpoint.path, &pairs)?;

        let response = self.requester.get(&url).await?;
        ensure_success(&response, &url)?;
        let document = serde_json::from_slice(&response.body)?;
        Ok((response, document))
    }
}

impl std::fmt::Debug for BenchmarkDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkDriver")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

fn ensure_success(response: &HttpResponse, url: &Url) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(Error::http_status(response.status, url.as_str()))
    }
}
