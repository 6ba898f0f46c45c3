//! Output writing module for benchmark collections
//!
//! Backfills missing descriptions, serializes the ordered collection as a
//! JSON array and prints the diagnostic type/state breakdown.

use crate::config::ProcessorConfig;
use crate::error::{BenchmarkError, Result};
use crate::models::{Benchmark, BenchmarkSummary};

use colored::*;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// JSON writer for the final benchmark collection
#[derive(Debug)]
pub struct BenchmarkWriter {
    output_path: PathBuf,
    pretty: bool,
}

impl BenchmarkWriter {
    pub fn new(output_path: PathBuf, config: &ProcessorConfig) -> Self {
        Self {
            output_path,
            pretty: config.pretty_output,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Backfill descriptions and write the collection in order
    pub async fn write_benchmarks(&self, benchmarks: &mut [Benchmark]) -> Result<usize> {
        backfill_descriptions(benchmarks);

        let payload = if self.pretty {
            serde_json::to_vec_pretty(benchmarks)?
        } else {
            serde_json::to_vec(benchmarks)?
        };

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| BenchmarkError::OutputWrite {
                        path: self.output_path.clone(),
                        source,
                    })?;
            }
        }

        fs::write(&self.output_path, &payload)
            .await
            .map_err(|source| BenchmarkError::OutputWrite {
                path: self.output_path.clone(),
                source,
            })?;

        debug!(
            "Wrote {} benchmarks ({} bytes) to {}",
            benchmarks.len(),
            payload.len(),
            self.output_path.display()
        );

        Ok(benchmarks.len())
    }
}

pub fn backfill_descriptions(benchmarks: &mut [Benchmark]) {
    for benchmark in benchmarks.iter_mut() {
        benchmark.backfill_description();
    }
}

/// Print the per-type and per-state counts
pub fn report_summary(summary: &BenchmarkSummary) {
    println!("\n{}", "Benchmarks by type".bright_green().bold());
    for (benchmark_type, count) in &summary.by_type {
        println!(
            "  {:<24} {}",
            benchmark_type.to_string().bright_cyan(),
            count.to_string().bright_white()
        );
    }

    println!("\n{}", "Benchmarks by state".bright_green().bold());
    for (state, count) in &summary.by_state {
        println!(
            "  {:<24} {}",
            state.bright_cyan(),
            count.to_string().bright_white()
        );
    }
}
