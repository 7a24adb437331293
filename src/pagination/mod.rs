//! Pagination module
//!
//! Supports: Offset (page index + has-next marker), Cursor (keyset token)
//!
//! # Overview
//!
//! A [`Paginator`] knows how to turn a [`PaginationState`] into query
//! parameters and how to derive the next state from the page it just
//! fetched. State is passed in and handed back by value, so a traversal
//! owns its position and nothing is shared between endpoints.

mod strategies;
mod types;

pub use strategies::{CursorPaginator, OffsetPaginator};
pub use types::{
    NextPage, PageOutcome, PaginationConfig, PaginationKind, PaginationState, Paginator,
};
