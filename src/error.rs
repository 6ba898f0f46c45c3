//! Error handling for datasheet processing operations.
//!
//! Root-level failures are fatal to a batch run. Region-scoped failures are
//! caught by the batch processor and turned into zero-record outcomes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Datasheet root not found at path: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Datasheet root could not be read: {path} - {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read datasheet for region {region}: {path} - {source}")]
    RegionRead {
        region: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out after {timeout_secs}s reading datasheet for region {region}: {path}")]
    RegionTimeout {
        region: String,
        path: PathBuf,
        timeout_secs: u64,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write output artifact: {path} - {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl BenchmarkError {
    /// Whether the error only invalidates a single region's contribution
    pub fn is_region_scoped(&self) -> bool {
        matches!(
            self,
            BenchmarkError::RegionRead { .. } | BenchmarkError::RegionTimeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;
