//! CLI runner - executes commands

use crate::bench::BenchmarkDriver;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{BenchConfig, ConfigSource};
use crate::error::{Error, Phase, Result};
use crate::report::{render_json, render_table, BenchmarkReport};
use serde_json::json;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command against the process environment, writing to stdout
    pub async fn run(&self) -> Result<()> {
        let mut source = ConfigSource::from_env();
        if let Some(path) = &self.cli.config {
            source = source.with_file(path)?;
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(&source, &mut out).await
    }

    /// Run the CLI command with an explicit configuration source and output
    pub async fn execute(&self, source: &ConfigSource, out: &mut impl Write) -> Result<()> {
        let config = BenchConfig::resolve(source)?;

        match self.cli.command {
            Commands::Run => self.bench(&config, out).await,
            Commands::Check => self.check(&config, out).await,
            Commands::Config => {
                serde_json::to_writer_pretty(&mut *out, &config)?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    /// Run the full benchmark
    async fn bench(&self, config: &BenchConfig, out: &mut impl Write) -> Result<()> {
        let driver = BenchmarkDriver::from_config(config)?;
        info!(
            "Benchmarking {} endpoints on {}",
            config.endpoints.len(),
            config.base_url
        );

        let results = driver.run(config).await?;
        let report = BenchmarkReport::new(config, results);

        match self.cli.format {
            OutputFormat::Table => render_table(&report, out),
            OutputFormat::Json => render_json(&report, out),
        }
    }

    /// Probe the server without benchmarking
    async fn check(&self, config: &BenchConfig, out: &mut impl Write) -> Result<()> {
        let endpoint = config
            .probe_endpoint()
            .ok_or_else(|| Error::config("No endpoint to probe"))?;

        let driver = BenchmarkDriver::from_config(config)?;
        driver
            .probe(endpoint)
            .await
            .map_err(|e| e.in_phase(Phase::Probe, &endpoint.name))?;

        match self.cli.format {
            OutputFormat::Table => {
                writeln!(
                    out,
                    "OK: {} answered at {}{}",
                    endpoint.name, config.base_url, endpoint.path
                )?;
            }
            OutputFormat::Json => {
                let status = json!({
                    "status": "ok",
                    "endpoint": endpoint.name,
                    "base_url": config.base_url,
                    "path": endpoint.path,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?;
            }
        }
        Ok(())
    }
}
