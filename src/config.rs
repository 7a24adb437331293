//! Benchmark configuration
//!
//! Settings are flat key/value pairs named like environment variables
//! (`BASE_URL`, `ENDPOINT_A_PATH`, ...). They are read from the process
//! environment, which takes precedence over an optional YAML file holding
//! the same keys, which in turn takes precedence over built-in defaults.

use crate::error::{Error, Result};
use crate::pagination::{PaginationConfig, PaginationKind};
use crate::query::{DocumentQuery, JsonPathQuery, QueryExpr};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Default target server
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default expected items per page
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Default number of unmeasured warmup requests
pub const DEFAULT_WARMUP_REQUESTS: u32 = 5;

/// Default number of measured requests
pub const DEFAULT_BENCHMARK_REQUESTS: u32 = 20;

/// Endpoint slots, in report order. A and B are required.
const ENDPOINT_IDS: [&str; 3] = ["A", "B", "C"];

/// Usage guidance printed on configuration errors
pub const USAGE: &str = "\
Required:
  ENDPOINT_A_PATH            path of the baseline endpoint (may include a query string)
  ENDPOINT_B_PATH            path of the candidate endpoint

Optional:
  ENDPOINT_C_PATH            path of a third endpoint to compare
  BASE_URL                   target server (default http://localhost:8080)
  ENDPOINT_<X>_NAME          display name (default \"Endpoint <X>\")
  ENDPOINT_<X>_PAGINATION    offset | cursor (default: A offset, B/C cursor)
  ENDPOINT_<X>_PAGE_PARAM    page index parameter for offset style (default page)
  ENDPOINT_<X>_CURSOR_PARAM  cursor parameter for cursor style (default afterId)
  ENDPOINT_<X>_INITIAL_CURSOR  first cursor value (default 0)
  ENDPOINT_<X>_COUNT_EXPR    JSONPath of the page items or item count
  ENDPOINT_<X>_HAS_NEXT_EXPR JSONPath of the next-page marker (offset style)
  ENDPOINT_<X>_CURSOR_EXPR   JSONPath of the next cursor (cursor style)
  ENDPOINT_<X>_PAGE_SIZE_PARAM  parameter used to send PAGE_SIZE, if any
  PAGE_SIZE                  items per full page (default 100)
  WARMUP_REQUESTS            unmeasured requests per endpoint (default 5)
  BENCHMARK_REQUESTS         measured requests per endpoint (default 20)
  REQUEST_TIMEOUT_SECS       per-request timeout (default none)
  PARALLEL                   benchmark endpoints concurrently (default false)

Keys can also be placed in a YAML file passed with --config.";

// ============================================================================
// Configuration Source
// ============================================================================

/// Layered key/value lookup: environment over file
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    env: HashMap<String, String>,
    file: HashMap<String, String>,
}

impl ConfigSource {
    /// Source backed by the process environment
    pub fn from_env() -> Self {
        Self {
            env: std::env::vars().collect(),
            file: HashMap::new(),
        }
    }

    /// Source backed by explicit pairs, in place of the environment
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            file: HashMap::new(),
        }
    }

    /// Add a YAML file layer beneath the environment
    pub fn with_file(self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        self.with_yaml_str(&content)
    }

    /// Add a YAML document layer beneath the environment
    pub fn with_yaml_str(mut self, yaml: &str) -> Result<Self> {
        let raw: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(yaml)?;

        for (key, value) in raw {
            let value = match value {
                serde_yaml::Value::Null => continue,
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                _ => {
                    return Err(Error::invalid_value(
                        key,
                        "expected a string, number or boolean",
                    ))
                }
            };
            self.file.insert(key, value);
        }

        Ok(self)
    }

    /// Look up a key. Blank values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        [&self.env, &self.file]
            .into_iter()
            .filter_map(|layer| layer.get(key))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .parse::<T>()
                .map_err(|e| Error::invalid_value(key, format!("'{raw}': {e}"))),
            None => Ok(default),
        }
    }

    fn parse_bool(&self, key: &str) -> Result<bool> {
        match self.get(key).map(str::to_ascii_lowercase).as_deref() {
            None | Some("0" | "false" | "no" | "off") => Ok(false),
            Some("1" | "true" | "yes" | "on") => Ok(true),
            Some(other) => Err(Error::invalid_value(
                key,
                format!("'{other}' is not a boolean"),
            )),
        }
    }
}

// ============================================================================
// Resolved Configuration
// ============================================================================

/// One endpoint under comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Slot identifier ("A", "B" or "C")
    pub id: String,
    /// Path relative to the base URL, possibly with a query string
    pub path: String,
    /// Display name
    pub name: String,
    /// How to walk this endpoint's pages
    pub pagination: PaginationConfig,
}

/// Fully resolved benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Target server
    pub base_url: String,
    /// Items per full page
    pub page_size: u64,
    /// Unmeasured requests per endpoint
    pub warmup_requests: u32,
    /// Measured requests per endpoint
    pub benchmark_requests: u32,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Benchmark endpoints concurrently
    pub parallel: bool,
    /// Endpoints in report order (A, B, then optional C)
    pub endpoints: Vec<EndpointSpec>,
}

impl BenchConfig {
    /// Resolve configuration from the process environment and an optional YAML file
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut source = ConfigSource::from_env();
        if let Some(path) = file {
            source = source.with_file(path)?;
        }
        Self::resolve(&source)
    }

    /// Resolve configuration, validating expressions with the built-in engine
    pub fn resolve(source: &ConfigSource) -> Result<Self> {
        Self::resolve_with(source, &JsonPathQuery::new())
    }

    /// Resolve configuration, validating expressions with `query`
    pub fn resolve_with(source: &ConfigSource, query: &dyn DocumentQuery) -> Result<Self> {
        let base_url = source.get_or("BASE_URL", DEFAULT_BASE_URL);
        url::Url::parse(&base_url)
            .map_err(|e| Error::invalid_value("BASE_URL", format!("'{base_url}': {e}")))?;

        let page_size = source.parse_or("PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(Error::invalid_value("PAGE_SIZE", "must be at least 1"));
        }

        let warmup_requests = source.parse_or("WARMUP_REQUESTS", DEFAULT_WARMUP_REQUESTS)?;

        let benchmark_requests =
            source.parse_or("BENCHMARK_REQUESTS", DEFAULT_BENCHMARK_REQUESTS)?;
        if benchmark_requests == 0 {
            return Err(Error::invalid_value(
                "BENCHMARK_REQUESTS",
                "must be at least 1",
            ));
        }

        let request_timeout_secs = match source.get("REQUEST_TIMEOUT_SECS") {
            Some(_) => {
                let secs: u64 = source.parse_or("REQUEST_TIMEOUT_SECS", 0)?;
                if secs == 0 {
                    return Err(Error::invalid_value(
                        "REQUEST_TIMEOUT_SECS",
                        "must be at least 1",
                    ));
                }
                Some(secs)
            }
            None => None,
        };

        let parallel = source.parse_bool("PARALLEL")?;

        let mut endpoints = Vec::with_capacity(ENDPOINT_IDS.len());
        for id in ENDPOINT_IDS {
            let path_key = format!("ENDPOINT_{id}_PATH");
            match source.get(&path_key) {
                Some(path) => endpoints.push(resolve_endpoint(source, id, path, query)?),
                None if id == "C" => {}
                None => return Err(Error::missing_field(path_key)),
            }
        }

        Ok(Self {
            base_url,
            page_size,
            warmup_requests,
            benchmark_requests,
            request_timeout_secs,
            parallel,
            endpoints,
        })
    }

    /// Per-request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Endpoint used for the liveness probe (the second endpoint)
    pub fn probe_endpoint(&self) -> Option<&EndpointSpec> {
        self.endpoints.get(1)
    }
}

fn resolve_endpoint(
    source: &ConfigSource,
    id: &str,
    path: &str,
    query: &dyn DocumentQuery,
) -> Result<EndpointSpec> {
    let key = |suffix: &str| format!("ENDPOINT_{id}_{suffix}");

    let default_kind = if id == "A" {
        PaginationKind::Offset
    } else {
        PaginationKind::Cursor
    };
    let kind = match source.get(&key("PAGINATION")) {
        Some(raw) => raw
            .parse::<PaginationKind>()
            .map_err(|e| Error::invalid_value(key("PAGINATION"), e))?,
        None => default_kind,
    };

    let expr = |suffix: &str, default: &str| -> Result<QueryExpr> {
        let expr = QueryExpr::json_path(source.get_or(&key(suffix), default));
        query
            .validate(&expr)
            .map_err(|e| Error::invalid_value(key(suffix), e.to_string()))?;
        Ok(expr)
    };

    let page_size_param = source.get(&key("PAGE_SIZE_PARAM")).map(str::to_string);

    let pagination = match kind {
        PaginationKind::Offset => PaginationConfig::Offset {
            page_param: source.get_or(&key("PAGE_PARAM"), "page"),
            count_expr: expr("COUNT_EXPR", "$.content")?,
            has_next_expr: expr("HAS_NEXT_EXPR", "$._links.next.href")?,
            page_size_param,
        },
        PaginationKind::Cursor => PaginationConfig::Cursor {
            cursor_param: source.get_or(&key("CURSOR_PARAM"), "afterId"),
            initial_cursor: source.get_or(&key("INITIAL_CURSOR"), "0"),
            count_expr: expr("COUNT_EXPR", "$.items")?,
            cursor_expr: expr("CURSOR_EXPR", "$.items[-1].id")?,
            page_size_param,
        },
    };

    Ok(EndpointSpec {
        id: id.to_string(),
        path: path.to_string(),
        name: source.get_or(&key("NAME"), &format!("Endpoint {id}")),
        pagination,
    })
}
