//! pagebench CLI
//!
//! Command-line interface for comparing paginated endpoints

use clap::Parser;
use pagebench::cli::{Cli, Runner};
use pagebench::config::USAGE;
use pagebench::error::ErrorKind;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout only carries the report
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        if e.kind() == ErrorKind::Configuration {
            eprintln!();
            eprintln!("{USAGE}");
        }
        std::process::exit(e.exit_code());
    }
}
