//! CLI module
//!
//! Command-line interface for running benchmarks.
//!
//! # Commands
//!
//! - `run` - Probe the server, benchmark every endpoint and print the report
//! - `check` - Validate configuration and probe the server
//! - `config` - Print the resolved configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
