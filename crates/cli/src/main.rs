//! Running-pod scaling report CLI
//!
//! Enumerates every namespace visible to the platform CLI's current
//! logged-in context, resolves each running pod's owning workload and any
//! autoscaler bound to it, and writes one CSV row per pod.

mod output;

use anyhow::Result;
use clap::Parser;
use report_lib::{pipeline, CliQuery, Progress};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Export running-pod scaling metadata to CSV
#[derive(Parser)]
#[command(name = "podrep")]
#[command(author, version, about = "Export running-pod scaling metadata to CSV", long_about = None)]
pub struct Cli {
    /// Namespaces to exclude: skip any namespace whose name contains one
    /// of these comma-separated substrings
    #[arg(long = "exclude-ns", value_name = "SUBSTRINGS", value_delimiter = ',')]
    pub exclude_ns: Vec<String>,

    /// Report file path, overwritten on each run
    #[arg(long, short, default_value = pipeline::DEFAULT_REPORT_PATH)]
    pub output: PathBuf,

    /// Platform CLI binary used for cluster queries (can also be set via
    /// PODREP_CLI_BIN env var)
    #[arg(long, env = "PODREP_CLI_BIN", default_value = report_lib::DEFAULT_BIN)]
    pub cli_bin: String,

    /// Disable the per-namespace progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(cli_bin = %cli.cli_bin, output = %cli.output.display(), "starting pod report");

    if !Progress::available() && !cli.no_progress {
        output::print_warning("progress display not built in; continuing without it");
    }

    let query = CliQuery::new(&cli.cli_bin);
    let options = pipeline::RunOptions {
        exclude_namespaces: cli.exclude_ns,
        output: cli.output.clone(),
        progress: !cli.no_progress,
    };

    let summary = pipeline::run(&query, &options).await?;

    output::print_success(&format!(
        "CSV file '{}' created successfully ({} pods across {} namespaces, {} skipped)",
        cli.output.display(),
        summary.pods,
        summary.namespaces,
        summary.skipped
    ));

    Ok(())
}
