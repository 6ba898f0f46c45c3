//! Configuration management and validation.
//!
//! Provides the processing parameters for a batch run: how many regions to
//! parse at once, which files count as datasheets, the optional per-file
//! record cap and read timeout, and output formatting.

use crate::constants::DEFAULT_DATASHEET_EXTENSION;
use crate::error::{BenchmarkError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Regions parsed concurrently (1 = sequential)
    pub workers: usize,

    /// File extensions recognized as datasheets, compared case-insensitively
    pub datasheet_extensions: Vec<String>,

    /// Resource cap on records emitted per file (None = unbounded)
    pub max_records_per_file: Option<usize>,

    /// Per-file read timeout; expiry drops only that region
    pub read_timeout: Option<Duration>,

    /// Pretty-print the JSON output artifact
    pub pretty_output: bool,

    /// Show the per-region progress bar
    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            datasheet_extensions: vec![DEFAULT_DATASHEET_EXTENSION.to_string()],
            max_records_per_file: None,
            read_timeout: None,
            pretty_output: true,
            show_progress: true,
        }
    }
}

impl ProcessorConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Replace the recognized datasheet extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datasheet_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Cap the number of records emitted per file
    pub fn with_max_records_per_file(mut self, max_records: usize) -> Self {
        self.max_records_per_file = Some(max_records);
        self
    }

    /// Set a per-file read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Write single-line JSON
    pub fn with_compact_output(mut self) -> Self {
        self.pretty_output = false;
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Worker count bounded by available cores
    pub fn effective_workers(&self) -> usize {
        let workers = self.workers.clamp(1, num_cpus::get().max(1));
        debug!(
            "Using {} region workers (requested {})",
            workers, self.workers
        );
        workers
    }

    /// Whether a file extension marks a datasheet
    pub fn is_datasheet_extension(&self, extension: &str) -> bool {
        self.datasheet_extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(extension))
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(BenchmarkError::Configuration {
                message: "workers must be at least 1".to_string(),
            });
        }
        if self.datasheet_extensions.is_empty() {
            return Err(BenchmarkError::Configuration {
                message: "at least one datasheet extension is required".to_string(),
            });
        }
        if self.max_records_per_file == Some(0) {
            return Err(BenchmarkError::Configuration {
                message: "max records per file must be greater than 0".to_string(),
            });
        }
        if self.read_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(BenchmarkError::Configuration {
                message: "read timeout must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
