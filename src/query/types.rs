//! Query types and traits

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A declarative expression selecting fields from a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryExpr {
    /// JSONPath expression (e.g. `$.items[-1].id`)
    JsonPath(String),
}

impl QueryExpr {
    /// Create a JSONPath expression
    pub fn json_path(expr: impl Into<String>) -> Self {
        Self::JsonPath(expr.into())
    }

    /// Raw expression text
    pub fn as_str(&self) -> &str {
        match self {
            Self::JsonPath(expr) => expr,
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pluggable query engine
pub trait DocumentQuery: Send + Sync {
    /// Evaluate an expression, returning every matched value in document order.
    /// An empty vector means the field is absent.
    fn evaluate(&self, expr: &QueryExpr, document: &Value) -> Result<Vec<Value>>;

    /// Check that an expression is well formed before any request is made
    fn validate(&self, _expr: &QueryExpr) -> Result<()> {
        Ok(())
    }

    /// True when the expression selects a set of values rather than one
    /// field. The item count of such an expression is its number of matches.
    fn is_multi(&self, _expr: &QueryExpr) -> bool {
        false
    }
}

/// Outcome of extracting an item count from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountExtraction {
    /// A usable non-negative count
    Count(u64),
    /// The expression matched nothing, or matched `null`
    Absent,
    /// The expression matched something that is not a count
    Malformed(String),
}

impl CountExtraction {
    /// The count, with absent and malformed values read as zero
    pub fn or_zero(&self) -> u64 {
        match self {
            Self::Count(n) => *n,
            Self::Absent | Self::Malformed(_) => 0,
        }
    }
}
