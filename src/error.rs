//! Error types for pagebench
//!
//! This module defines the error hierarchy for the whole tool.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagebench
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    // ============================================================================
    // Liveness Errors
    // ============================================================================
    #[error("Target server at {url} is not reachable: {message}")]
    Liveness { url: String, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Measurement Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Cannot summarize an empty sample set")]
    EmptySampleSet,

    #[error("{phase} failed for '{endpoint}': {source}")]
    Phase {
        phase: Phase,
        endpoint: String,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Measurement phase a runtime failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Liveness probe before any measurement
    Probe,
    /// Unmeasured warmup requests
    Warmup,
    /// Latency sampling
    Sampling,
    /// One-shot payload size measurement
    Size,
    /// Full pagination traversal
    Traversal,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Probe => "liveness probe",
            Self::Warmup => "warmup",
            Self::Sampling => "latency sampling",
            Self::Size => "size measurement",
            Self::Traversal => "pagination traversal",
        };
        f.write_str(name)
    }
}

/// Coarse classification used for exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid input, detected before any request
    Configuration,
    /// Target server did not answer the preliminary probe
    Liveness,
    /// Any failure during the measurement phases
    Runtime,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a liveness error
    pub fn liveness(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Liveness {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Wrap an error with the phase and endpoint it happened in
    pub fn in_phase(self, phase: Phase, endpoint: impl Into<String>) -> Self {
        Self::Phase {
            phase,
            endpoint: endpoint.into(),
            source: Box::new(self),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::JsonPath { .. } => ErrorKind::Configuration,
            Error::Liveness { .. } => ErrorKind::Liveness,
            Error::Phase { source, .. } => source.kind(),
            _ => ErrorKind::Runtime,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::Liveness => 3,
            ErrorKind::Runtime => 1,
        }
    }
}

/// Result type alias for pagebench
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("ENDPOINT_A_PATH");
        assert_eq!(
            err.to_string(),
            "Missing required config field: ENDPOINT_A_PATH"
        );

        let err = Error::http_status(503, "http://localhost/items");
        assert_eq!(err.to_string(), "HTTP 503 from http://localhost/items");
    }

    #[test]
    fn test_phase_display_names_endpoint() {
        let err = Error::http_status(500, "http://x/y").in_phase(Phase::Traversal, "Cursor API");
        assert_eq!(
            err.to_string(),
            "pagination traversal failed for 'Cursor API': HTTP 500 from http://x/y"
        );
    }

    #[test]
    fn test_kind_and_exit_code() {
        assert_eq!(Error::missing_field("x").kind(), ErrorKind::Configuration);
        assert_eq!(Error::missing_field("x").exit_code(), 2);

        let err = Error::liveness("http://localhost:8080", "connection refused");
        assert_eq!(err.kind(), ErrorKind::Liveness);
        assert_eq!(err.exit_code(), 3);

        assert_eq!(Error::EmptySampleSet.kind(), ErrorKind::Runtime);
        assert_eq!(Error::EmptySampleSet.exit_code(), 1);
    }

    #[test]
    fn test_unparseable_body_is_runtime() {
        let err: Error = serde_json::from_slice::<serde_json::Value>(b"<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::JsonParse(_)));
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert_eq!(err.in_phase(Phase::Traversal, "A").exit_code(), 1);
    }

    #[test]
    fn test_phase_kind_follows_source() {
        let err = Error::liveness("http://x", "down").in_phase(Phase::Probe, "B");
        assert_eq!(err.kind(), ErrorKind::Liveness);

        let err = Error::http_status(404, "http://x").in_phase(Phase::Sampling, "A");
        assert_eq!(err.kind(), ErrorKind::Runtime);
    }
}
