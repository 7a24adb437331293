//! Report module
//!
//! Collects per-endpoint results into a [`BenchmarkReport`], derives the
//! pairwise improvement percentages, and renders the whole thing as an
//! aligned text table or as JSON.

mod render;
mod types;

pub use render::{format_improvement, render_json, render_table};
pub use types::{BenchmarkReport, Comparison};
