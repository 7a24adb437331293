//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextPage, PageOutcome, PaginationKind, PaginationState, Paginator};
use crate::error::{Error, Result};
use crate::query::{count_or_zero, extract_marker, extract_token, DocumentQuery, QueryExpr};
use serde_json::Value;
use tracing::{debug, warn};

fn mismatch(expected: PaginationKind, state: &PaginationState) -> Error {
    Error::Other(format!(
        "{expected:?} paginator received {:?} state ({state})",
        state.kind()
    ))
}

fn with_page_size(
    mut params: Vec<(String, String)>,
    page_size_param: Option<&String>,
    page_size: u64,
) -> Vec<(String, String)> {
    if let Some(param) = page_size_param {
        params.push((param.clone(), page_size.to_string()));
    }
    params
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset / link based pagination (e.g. HATEOAS `_links.next`)
///
/// Requests `?page=N` starting at 0. A page is the last one when its
/// next-link marker is missing or it holds fewer than `page_size` items.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for the page index
    pub page_param: String,
    /// Expected items per full page
    pub page_size: u64,
    /// Optional query parameter name for the page size
    pub page_size_param: Option<String>,
    /// Expression for the page's item count
    pub count_expr: QueryExpr,
    /// Expression for the next-page marker
    pub has_next_expr: QueryExpr,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        page_param: impl Into<String>,
        page_size: u64,
        count_expr: QueryExpr,
        has_next_expr: QueryExpr,
    ) -> Self {
        Self {
            page_param: page_param.into(),
            page_size,
            page_size_param: None,
            count_expr,
            has_next_expr,
        }
    }

    /// Also send the page size as a query parameter
    #[must_use]
    pub fn with_page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = Some(param.into());
        self
    }
}

impl Paginator for OffsetPaginator {
    fn kind(&self) -> PaginationKind {
        PaginationKind::Offset
    }

    fn initial_state(&self) -> PaginationState {
        PaginationState::offset(0)
    }

    fn page_params(&self, state: &PaginationState) -> Result<Vec<(String, String)>> {
        let PaginationState::Offset { page } = state else {
            return Err(mismatch(PaginationKind::Offset, state));
        };
        Ok(with_page_size(
            vec![(self.page_param.clone(), page.to_string())],
            self.page_size_param.as_ref(),
            self.page_size,
        ))
    }

    fn process_page(
        &self,
        document: &Value,
        state: PaginationState,
        query: &dyn DocumentQuery,
    ) -> Result<PageOutcome> {
        let PaginationState::Offset { page } = state else {
            return Err(mismatch(PaginationKind::Offset, &state));
        };

        let items = count_or_zero(query, &self.count_expr, document)?;
        let marker = extract_marker(query, &self.has_next_expr, document)?;

        if marker.is_none() || items < self.page_size {
            debug!(
                "Page {} is the last page ({} items, next marker {})",
                page,
                items,
                if marker.is_some() { "present" } else { "absent" }
            );
            return Ok(PageOutcome {
                items,
                next: NextPage::Done,
            });
        }

        Ok(PageOutcome {
            items,
            next: NextPage::Continue(PaginationState::offset(page + 1)),
        })
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor / keyset pagination (e.g. `?afterId=123`)
///
/// The next cursor is read from the page just fetched, typically the id of
/// its trailing element. An empty or short page ends the traversal.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for the cursor
    pub cursor_param: String,
    /// Cursor sent with the first page
    pub initial_cursor: String,
    /// Expected items per full page
    pub page_size: u64,
    /// Optional query parameter name for the page size
    pub page_size_param: Option<String>,
    /// Expression for the page's item count
    pub count_expr: QueryExpr,
    /// Expression for the next cursor
    pub cursor_expr: QueryExpr,
}

impl CursorPaginator {
    /// Create a new cursor paginator starting at cursor `"0"`
    pub fn new(
        cursor_param: impl Into<String>,
        page_size: u64,
        count_expr: QueryExpr,
        cursor_expr: QueryExpr,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            initial_cursor: "0".to_string(),
            page_size,
            page_size_param: None,
            count_expr,
            cursor_expr,
        }
    }

    /// Set the cursor used for the first page
    #[must_use]
    pub fn with_initial_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.initial_cursor = cursor.into();
        self
    }

    /// Also send the page size as a query parameter
    #[must_use]
    pub fn with_page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = Some(param.into());
        self
    }
}

impl Paginator for CursorPaginator {
    fn kind(&self) -> PaginationKind {
        PaginationKind::Cursor
    }

    fn initial_state(&self) -> PaginationState {
        PaginationState::cursor(self.initial_cursor.clone())
    }

    fn page_params(&self, state: &PaginationState) -> Result<Vec<(String, String)>> {
        let PaginationState::Cursor { token } = state else {
            return Err(mismatch(PaginationKind::Cursor, state));
        };
        Ok(with_page_size(
            vec![(self.cursor_param.clone(), token.clone())],
            self.page_size_param.as_ref(),
            self.page_size,
        ))
    }

    fn process_page(
        &self,
        document: &Value,
        state: PaginationState,
        query: &dyn DocumentQuery,
    ) -> Result<PageOutcome> {
        let token = match state {
            PaginationState::Cursor { token } => token,
            other => return Err(mismatch(PaginationKind::Cursor, &other)),
        };

        let items = count_or_zero(query, &self.count_expr, document)?;
        if items == 0 || items < self.page_size {
            debug!("Cursor {} is the last page ({} items)", token, items);
            return Ok(PageOutcome {
                items,
                next: NextPage::Done,
            });
        }

        match extract_token(query, &self.cursor_expr, document)? {
            Some(next) => Ok(PageOutcome {
                items,
                next: NextPage::Continue(PaginationState::cursor(next)),
            }),
            None => {
                warn!(
                    "Full page after cursor {} but '{}' yielded no cursor, stopping",
                    token, self.cursor_expr
                );
                Ok(PageOutcome {
                    items,
                    next: NextPage::Done,
                })
            }
        }
    }
}
