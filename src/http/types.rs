//! HTTP request/response types

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use url::Url;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Raw response body
    pub body: Bytes,
    /// Time from sending the request until the body was fully read
    pub elapsed: Duration,
}

impl HttpResponse {
    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Body length in bytes
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

/// Performs GET requests for the benchmark driver
#[async_trait]
pub trait Requester: Send + Sync {
    /// Send a GET request and read the whole body.
    ///
    /// Transport failures are errors; any HTTP status is a successful response.
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}
