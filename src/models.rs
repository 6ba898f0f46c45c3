//! Core data structures and types for datasheet processing.
//!
//! Defines the benchmark record, its in-progress form used while a record
//! block is being scanned, region descriptors and processing statistics.

use crate::constants::DESCRIPTION_PREFIX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Survey point categories recognized in datasheets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BenchmarkType {
    #[default]
    ControlPoint,
    Vertical,
    #[serde(rename = "CORS")]
    Cors,
    Triangulation,
    PrimaryAirportControl,
}

impl BenchmarkType {
    /// Label used in serialized output and descriptions
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkType::ControlPoint => "ControlPoint",
            BenchmarkType::Vertical => "Vertical",
            BenchmarkType::Cors => "CORS",
            BenchmarkType::Triangulation => "Triangulation",
            BenchmarkType::PrimaryAirportControl => "PrimaryAirportControl",
        }
    }
}

impl fmt::Display for BenchmarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized survey benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub benchmark_type: BenchmarkType,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub state: String,
    pub description: Option<String>,
    pub source_reference: Option<PathBuf>,
}

impl Benchmark {
    /// Fill in the description from type and state when none was extracted
    pub fn backfill_description(&mut self) {
        if self.description.is_none() {
            self.description = Some(format!(
                "{} {} control point in {}",
                DESCRIPTION_PREFIX, self.benchmark_type, self.state
            ));
        }
    }
}

/// A record block that is still being scanned
///
/// Every field starts unset except `state` and `benchmark_type`, and is
/// filled in as field lines of the same block are recognized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialBenchmark {
    pub id: Option<String>,
    pub name: Option<String>,
    pub benchmark_type: BenchmarkType,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub state: String,
    pub description: Option<String>,
    pub source_reference: Option<PathBuf>,
}

impl PartialBenchmark {
    /// Open a fresh record tagged with its region code
    pub fn new(state: impl Into<String>, source_reference: Option<PathBuf>) -> Self {
        Self {
            state: state.into(),
            source_reference,
            ..Default::default()
        }
    }

    /// Accept the record iff it has an identifier and both coordinates
    pub fn finalize(self) -> Option<Benchmark> {
        let (Some(id), Some(latitude), Some(longitude)) = (self.id, self.latitude, self.longitude)
        else {
            return None;
        };

        Some(Benchmark {
            id,
            name: self.name,
            benchmark_type: self.benchmark_type,
            latitude,
            longitude,
            elevation: self.elevation,
            state: self.state,
            description: self.description,
            source_reference: self.source_reference,
        })
    }
}

/// A region directory and the datasheet chosen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: String,
    pub path: PathBuf,
    pub datasheet: Option<PathBuf>,
}

/// How a region's parse ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionStatus {
    Parsed,
    /// No datasheet file in the region directory
    Skipped,
    /// Read failed or timed out; the region contributes nothing
    Failed(String),
}

/// Records and counters produced by parsing one region
#[derive(Debug, Clone)]
pub struct RegionOutcome {
    pub region: String,
    pub status: RegionStatus,
    pub benchmarks: Vec<Benchmark>,
    pub rejected: usize,
    pub truncated: bool,
}

impl RegionOutcome {
    pub fn skipped(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            status: RegionStatus::Skipped,
            benchmarks: Vec::new(),
            rejected: 0,
            truncated: false,
        }
    }

    pub fn failed(region: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            status: RegionStatus::Failed(reason.into()),
            benchmarks: Vec::new(),
            rejected: 0,
            truncated: false,
        }
    }
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub regions_discovered: usize,
    pub regions_processed: usize,
    pub regions_skipped: usize,
    pub regions_failed: usize,
    pub records_emitted: usize,
    pub records_rejected: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
    pub summary: BenchmarkSummary,
}

/// Diagnostic counts derived from the final collection
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkSummary {
    pub total: usize,
    pub by_type: BTreeMap<BenchmarkType, usize>,
    pub by_state: BTreeMap<String, usize>,
}

impl BenchmarkSummary {
    pub fn from_benchmarks(benchmarks: &[Benchmark]) -> Self {
        let mut summary = Self {
            total: benchmarks.len(),
            ..Default::default()
        };
        for benchmark in benchmarks {
            *summary.by_type.entry(benchmark.benchmark_type).or_insert(0) += 1;
            *summary.by_state.entry(benchmark.state.clone()).or_insert(0) += 1;
        }
        summary
    }
}
