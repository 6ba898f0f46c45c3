//! Batch processing engine.
//!
//! Orchestrates a full run over a datasheet root: region discovery,
//! per-region parsing, fan-in of the per-region record lists in discovery
//! order, and writing of the final collection.

pub mod region;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{region::parse_region, writer::BenchmarkWriter};

use crate::config::ProcessorConfig;
use crate::constants::{DEFAULT_OUTPUT_FILE_NAME, PROGRESS_TEMPLATE};
use crate::discovery::RegionDiscovery;
use crate::error::{BenchmarkError, Result};
use crate::models::{Benchmark, BenchmarkSummary, ProcessingStats, RegionOutcome, RegionStatus};

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};

/// Main processor for datasheet batch runs
#[derive(Debug)]
pub struct BatchProcessor {
    root: PathBuf,
    output_path: PathBuf,
    config: ProcessorConfig,
}

impl BatchProcessor {
    /// Create a new batch processor; the root must already exist
    pub fn new(root: PathBuf, output_path: Option<PathBuf>) -> Result<Self> {
        if !root.is_dir() {
            return Err(BenchmarkError::RootNotFound { path: root });
        }

        let output_path = output_path.unwrap_or_else(|| root.join(DEFAULT_OUTPUT_FILE_NAME));

        Ok(Self {
            root,
            output_path,
            config: ProcessorConfig::default(),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Parse every region and return the concatenated collection
    ///
    /// Regions run through a bounded pipeline of `workers` concurrent
    /// parses. Results are joined in discovery order, so the output is the
    /// same whatever the worker count.
    pub async fn collect(&self) -> Result<(Vec<Benchmark>, ProcessingStats)> {
        self.config.validate()?;

        let discovery = RegionDiscovery::new(self.root.clone(), &self.config);
        let regions = task::spawn_blocking(move || discovery.discover_regions())
            .await
            .map_err(|e| BenchmarkError::Io(std::io::Error::other(e)))??;

        info!("Discovered {} regions under {}", regions.len(), self.root.display());

        let pb = if self.config.show_progress {
            ProgressBar::new(regions.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .map_err(|e| BenchmarkError::Configuration {
                    message: format!("Invalid progress template: {}", e),
                })?
                .progress_chars("#>-"),
        );
        pb.set_message("Processing regions");

        let workers = self.config.effective_workers();
        let config = &self.config;

        let outcomes: Vec<RegionOutcome> = stream::iter(regions.iter())
            .map(|region| {
                let pb = pb.clone();
                async move {
                    pb.set_message(format!("Processing: {}", region.code));
                    let outcome = parse_region(region, config).await;
                    pb.inc(1);
                    outcome
                }
            })
            .buffered(workers)
            .collect()
            .await;

        pb.finish_with_message("All regions processed");

        let mut stats = ProcessingStats {
            regions_discovered: regions.len(),
            output_path: self.output_path.clone(),
            ..Default::default()
        };
        let mut benchmarks = Vec::new();

        for outcome in outcomes {
            match outcome.status {
                RegionStatus::Parsed => stats.regions_processed += 1,
                RegionStatus::Skipped => stats.regions_skipped += 1,
                RegionStatus::Failed(_) => stats.regions_failed += 1,
            }
            stats.records_rejected += outcome.rejected;
            benchmarks.extend(outcome.benchmarks);
        }
        stats.records_emitted = benchmarks.len();

        debug!(
            "Collected {} benchmarks ({} rejected) from {} regions",
            stats.records_emitted, stats.records_rejected, stats.regions_processed
        );

        Ok((benchmarks, stats))
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let verbose = self.config.show_progress;

        if verbose {
            println!("{}", "Starting datasheet processing".bright_green().bold());
            println!("  {} {}", "Root:".bright_cyan(), self.root.display());
            println!("  {} {}", "Output:".bright_cyan(), self.output_path.display());
            println!("\n{}", "Processing regions...".bright_yellow());
        }

        let (mut benchmarks, mut stats) = self.collect().await?;

        let writer = BenchmarkWriter::new(self.output_path.clone(), &self.config);
        writer.write_benchmarks(&mut benchmarks).await?;

        stats.summary = BenchmarkSummary::from_benchmarks(&benchmarks);
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Wrote {} benchmarks to {}",
            stats.records_emitted,
            writer.output_path().display()
        );

        if verbose {
            report_stats(&stats);
            writer::report_summary(&stats.summary);
        }

        Ok(stats)
    }
}

fn report_stats(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {} of {}",
        "Regions processed:".bright_cyan(),
        stats.regions_processed.to_string().bright_white(),
        stats.regions_discovered
    );
    if stats.regions_skipped > 0 {
        println!(
            "  {} {}",
            "Regions without datasheet:".bright_yellow(),
            stats.regions_skipped.to_string().bright_yellow()
        );
    }
    if stats.regions_failed > 0 {
        println!(
            "  {} {}",
            "Regions failed:".bright_red(),
            stats.regions_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Benchmarks:".bright_cyan(),
        stats.records_emitted.to_string().bright_white().bold()
    );
}
