// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagebench
//!
//! Compare alternative implementations of the same paginated API: an
//! offset/HATEOAS endpoint against a cursor/keyset endpoint, optionally with
//! a third contender.
//!
//! ## Features
//!
//! - **Latency sampling**: warmup, then min/avg/p50/p95/max over measured page requests
//! - **Payload size**: body size of an unpaginated request
//! - **Full traversal**: every page from first to last, with item and page counts
//! - **Improvements**: relative gain of each endpoint over the ones before it
//! - **Pluggable extraction**: JSONPath expressions for counts, next links and cursors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagebench::bench::BenchmarkDriver;
//! use pagebench::config::BenchConfig;
//! use pagebench::report::{render_table, BenchmarkReport};
//!
//! #[tokio::main]
//! async fn main() -> pagebench::Result<()> {
//!     // ENDPOINT_A_PATH / ENDPOINT_B_PATH from the environment
//!     let config = BenchConfig::load(None)?;
//!
//!     let driver = BenchmarkDriver::from_config(&config)?;
//!     let results = driver.run(&config).await?;
//!
//!     let report = BenchmarkReport::new(&config, results);
//!     render_table(&report, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    BenchConfig (env + YAML)                   │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │   BenchmarkDriver: probe → warmup → sample → size → traverse  │
//! └──────┬──────────────────┬───────────────────┬────────────────┘
//!        │                  │                   │
//! ┌──────┴──────┐   ┌───────┴───────┐   ┌───────┴───────┐
//! │  Requester  │   │   Paginator   │   │ DocumentQuery │
//! │  (reqwest)  │   │ Offset/Cursor │   │  (JSONPath)   │
//! └─────────────┘   └───────────────┘   └───────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │      stats::summarize → BenchmarkReport → table / JSON        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Configuration resolution
pub mod config;

/// HTTP requester
pub mod http;

/// Document field extraction
pub mod query;

/// Pagination strategies
pub mod pagination;

/// Latency statistics
pub mod stats;

/// Benchmark driver
pub mod bench;

/// Report rendering
pub mod report;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use bench::{BenchmarkDriver, EndpointResult};
pub use config::{BenchConfig, EndpointSpec};
pub use stats::{improvement_percent, summarize, SampleSet, StatSummary, TraversalResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
