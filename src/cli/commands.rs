//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compare paginated API endpoints
#[derive(Parser, Debug)]
#[command(name = "pagebench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file with configuration keys (environment variables take precedence)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    ///
    /// `--verbose` only raises this crate to debug; HTTP stack crates stay at info.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info,pagebench=debug"
        } else {
            "info"
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the full benchmark and print the report
    Run,

    /// Validate configuration and check that the server answers
    Check,

    /// Print the resolved configuration as JSON
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Pretty-printed JSON
    Json,
}
