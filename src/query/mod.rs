//! Document query module
//!
//! Extracts pagination fields (item counts, has-next markers, cursor tokens)
//! from JSON response documents.
//!
//! # Overview
//!
//! Expressions are represented by [`QueryExpr`] and evaluated through the
//! [`DocumentQuery`] trait, so the query engine can be swapped without
//! touching the benchmark driver. [`JsonPathQuery`] is the built-in engine.
//! The `extract_*` helpers turn raw matches into the typed values the
//! pagination strategies need, applying the "malformed count is zero" rule.

mod evaluator;
mod extract;
mod types;

pub use evaluator::JsonPathQuery;
pub use extract::{count_or_zero, extract_count, extract_marker, extract_token};
pub use types::{CountExtraction, DocumentQuery, QueryExpr};
