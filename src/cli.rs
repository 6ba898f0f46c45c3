//! Command-line interface components.

use crate::config::ProcessorConfig;
use crate::constants::DEFAULT_DATASHEET_EXTENSION;
use crate::models::ProcessingStats;
use crate::processor::BatchProcessor;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "ngs-benchmarks")]
#[command(about = "Extract survey benchmarks from NGS datasheet dumps into a JSON collection")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Root directory with one subdirectory of datasheets per region
    #[arg(value_name = "DATASHEET_ROOT")]
    pub root: PathBuf,

    /// Output JSON file (defaults to DATASHEET_ROOT/benchmarks.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of regions parsed concurrently
    #[arg(short, long, default_value_t = 1)]
    pub workers: usize,

    /// Datasheet file extension; repeat to accept several
    #[arg(long = "extension", value_name = "EXT", default_values_t = [DEFAULT_DATASHEET_EXTENSION.to_string()])]
    pub extensions: Vec<String>,

    /// Stop emitting records from a file after this many
    #[arg(long)]
    pub max_records_per_file: Option<usize>,

    /// Abandon a region whose datasheet takes longer than this to read
    #[arg(long)]
    pub read_timeout_secs: Option<u64>,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Only log warnings and errors, no progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the processor configuration from flags
    pub fn to_config(&self) -> ProcessorConfig {
        let mut config = ProcessorConfig::default()
            .with_workers(self.workers)
            .with_extensions(self.extensions.iter().cloned());

        if let Some(max_records) = self.max_records_per_file {
            config = config.with_max_records_per_file(max_records);
        }
        if let Some(secs) = self.read_timeout_secs {
            config = config.with_read_timeout(Duration::from_secs(secs));
        }
        if self.compact {
            config = config.with_compact_output();
        }
        if self.quiet {
            config = config.without_progress();
        }
        config
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Set up structured logging
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ngs_benchmarks={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Run a full batch from parsed arguments
pub async fn run(args: Args) -> Result<ProcessingStats> {
    let config = args.to_config();
    config
        .validate()
        .context("Invalid command-line configuration")?;

    let processor = BatchProcessor::new(args.root.clone(), args.output.clone())
        .with_context(|| format!("Cannot use datasheet root {}", args.root.display()))?
        .with_config(config);

    processor
        .process()
        .await
        .context("Datasheet processing failed")
}
