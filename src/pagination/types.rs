//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::strategies::{CursorPaginator, OffsetPaginator};
use crate::error::Result;
use crate::query::{DocumentQuery, QueryExpr};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Pagination style of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationKind {
    /// Numeric page index, terminated by a has-next marker or a short page
    Offset,
    /// Opaque token taken from the previous page, terminated by a short page
    Cursor,
}

impl std::str::FromStr for PaginationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offset" | "page" | "link" => Ok(Self::Offset),
            "cursor" | "keyset" => Ok(Self::Cursor),
            other => Err(format!("unknown pagination kind '{other}' (expected offset or cursor)")),
        }
    }
}

/// Position of the next page to request.
///
/// A state always points at a page that has not been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaginationState {
    /// Zero-based page index
    Offset {
        /// Next page index
        page: u64,
    },
    /// Cursor token
    Cursor {
        /// Next cursor value
        token: String,
    },
}

impl PaginationState {
    /// Create an offset state
    pub fn offset(page: u64) -> Self {
        Self::Offset { page }
    }

    /// Create a cursor state
    pub fn cursor(token: impl Into<String>) -> Self {
        Self::Cursor {
            token: token.into(),
        }
    }

    /// Kind of pagination this state belongs to
    pub fn kind(&self) -> PaginationKind {
        match self {
            Self::Offset { .. } => PaginationKind::Offset,
            Self::Cursor { .. } => PaginationKind::Cursor,
        }
    }

    /// Position rendered as a query parameter value
    pub fn position(&self) -> String {
        match self {
            Self::Offset { page } => page.to_string(),
            Self::Cursor { token } => token.clone(),
        }
    }
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset { page } => write!(f, "page {page}"),
            Self::Cursor { token } => write!(f, "cursor {token}"),
        }
    }
}

/// Result of processing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available starting at this state
    Continue(PaginationState),
    /// The processed page was the last one
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// What a single page contributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// Items on the page (absent or malformed counts read as zero)
    pub items: u64,
    /// Where to go next
    pub next: NextPage,
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Pagination style
    fn kind(&self) -> PaginationKind;

    /// State for the first page of a traversal
    fn initial_state(&self) -> PaginationState;

    /// Query parameters that request the page at `state`
    fn page_params(&self, state: &PaginationState) -> Result<Vec<(String, String)>>;

    /// Consume the state of the page just fetched and decide where to go next
    fn process_page(
        &self,
        document: &Value,
        state: PaginationState,
        query: &dyn DocumentQuery,
    ) -> Result<PageOutcome>;
}

/// Per-endpoint pagination configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaginationConfig {
    /// Offset / link based pagination
    Offset {
        /// Query parameter carrying the page index (e.g. "page")
        page_param: String,
        /// Expression yielding the item count of a page
        count_expr: QueryExpr,
        /// Expression yielding the "next page" marker
        has_next_expr: QueryExpr,
        /// Optional query parameter carrying the page size
        page_size_param: Option<String>,
    },

    /// Cursor / keyset based pagination
    Cursor {
        /// Query parameter carrying the cursor (e.g. "afterId")
        cursor_param: String,
        /// Cursor used for the first page
        initial_cursor: String,
        /// Expression yielding the item count of a page
        count_expr: QueryExpr,
        /// Expression yielding the next cursor
        cursor_expr: QueryExpr,
        /// Optional query parameter carrying the page size
        page_size_param: Option<String>,
    },
}

impl PaginationConfig {
    /// Offset pagination with the given page parameter and expressions
    pub fn offset(
        page_param: impl Into<String>,
        count_expr: QueryExpr,
        has_next_expr: QueryExpr,
    ) -> Self {
        Self::Offset {
            page_param: page_param.into(),
            count_expr,
            has_next_expr,
            page_size_param: None,
        }
    }

    /// Cursor pagination starting at `"0"`
    pub fn cursor(
        cursor_param: impl Into<String>,
        count_expr: QueryExpr,
        cursor_expr: QueryExpr,
    ) -> Self {
        Self::Cursor {
            cursor_param: cursor_param.into(),
            initial_cursor: "0".to_string(),
            count_expr,
            cursor_expr,
            page_size_param: None,
        }
    }

    /// Pagination style
    pub fn kind(&self) -> PaginationKind {
        match self {
            Self::Offset { .. } => PaginationKind::Offset,
            Self::Cursor { .. } => PaginationKind::Cursor,
        }
    }

    /// Build the paginator for this configuration
    pub fn build(&self, page_size: u64) -> Box<dyn Paginator> {
        match self {
            Self::Offset {
                page_param,
                count_expr,
                has_next_expr,
                page_size_param,
            } => {
                let mut paginator = OffsetPaginator::new(
                    page_param.clone(),
                    page_size,
                    count_expr.clone(),
                    has_next_expr.clone(),
                );
                if let Some(param) = page_size_param {
                    paginator = paginator.with_page_size_param(param.clone());
                }
                Box::new(paginator)
            }
            Self::Cursor {
                cursor_param,
                initial_cursor,
                count_expr,
                cursor_expr,
                page_size_param,
            } => {
                let mut paginator = CursorPaginator::new(
                    cursor_param.clone(),
                    page_size,
                    count_expr.clone(),
                    cursor_expr.clone(),
                )
                .with_initial_cursor(initial_cursor.clone());
                if let Some(param) = page_size_param {
                    paginator = paginator.with_page_size_param(param.clone());
                }
                Box::new(paginator)
            }
        }
    }
}
