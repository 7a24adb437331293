//! HTTP client module
//!
//! The benchmark only ever issues plain GET requests and needs three things
//! back: the status, the raw body, and how long the exchange took.
//!
//! # Features
//!
//! - **Pluggable requester**: the driver talks to the [`Requester`] trait
//! - **Timing**: elapsed time covers sending the request and reading the body
//! - **URL composition**: pagination parameters are appended to paths that
//!   may already carry a query string

mod client;
mod types;

pub use client::{compose_url, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use types::{HttpResponse, Requester};

#[cfg(test)]
mod tests;
